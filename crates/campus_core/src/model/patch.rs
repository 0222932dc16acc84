//! Tri-state field updates.
//!
//! A JSON update body distinguishes a key that is missing from a key that is
//! present with `null`. `Option<T>` cannot hold that difference, so patch
//! structs carry `Patch<T>` fields marked `#[serde(default)]`: a missing key
//! never reaches the deserializer and stays `Absent`.

use crate::model::{EntityId, UNRESOLVED_REFERENCE};
use serde::{Deserialize, Deserializer};

/// One field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field not mentioned; target left untouched.
    #[default]
    Absent,
    /// Field mentioned with an explicit `null`.
    Null,
    /// Field mentioned with a concrete value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Writes this patch into a nullable slot.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Null => *slot = None,
            Self::Value(value) => *slot = Some(value),
        }
    }
}

impl Patch<EntityId> {
    /// Writes this patch into a required relation slot.
    ///
    /// An explicit `null` collapses to `UNRESOLVED_REFERENCE`, which parent
    /// validation later rejects; it never clears the relation.
    pub fn apply_reference(self, slot: &mut Option<EntityId>) {
        match self {
            Self::Absent => {}
            Self::Null => *slot = Some(UNRESOLVED_REFERENCE),
            Self::Value(id) => *slot = Some(id),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}
