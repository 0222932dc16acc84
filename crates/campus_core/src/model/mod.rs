//! Campus domain model.
//!
//! # Responsibility
//! - Define the read shapes (shallow and full) returned by repositories.
//! - Define candidate drafts used for creation and as merge targets.
//! - Define tri-state patches used for partial updates.
//!
//! # Invariants
//! - Ids are assigned once by the store and never rewritten.
//! - Full views never carry a back-reference inside their child lists.

use serde::Serializer;
use std::sync::Arc;

pub mod department;
pub mod patch;
pub mod professor;
pub mod university;

/// Store-assigned row identifier.
pub type EntityId = i64;

/// Reference id produced by an explicit-null relation patch.
///
/// The store never assigns `0`, so a draft holding it fails parent lookup.
pub const UNRESOLVED_REFERENCE: EntityId = 0;

/// Anything addressable by a store id.
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// Serializes a shared parent as its id only (shallow list shape).
pub(crate) fn serialize_parent_id<S, T>(parent: &Arc<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Identified,
{
    serializer.serialize_i64(parent.id())
}
