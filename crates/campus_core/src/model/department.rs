//! Department model.
//!
//! # Invariants
//! - A stored department references an existing university.
//! - Shallow departments returned by one list call share parent instances.

use crate::model::patch::Patch;
use crate::model::professor::ProfessorSummary;
use crate::model::university::University;
use crate::model::{serialize_parent_id, EntityId, Identified};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Department list entry. Serializes its parent as `university_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "university_id", serialize_with = "serialize_parent_id")]
    pub university: Arc<University>,
}

impl Department {
    pub fn university_id(&self) -> EntityId {
        self.university.id
    }
}

impl Identified for Department {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Department as a child inside `UniversityFull`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    pub id: EntityId,
    pub name: String,
}

/// Department as the materialized parent of a `ProfessorFull`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentParent {
    pub id: EntityId,
    pub name: String,
    pub university: University,
}

/// Department with its university and professor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentFull {
    pub id: EntityId,
    pub name: String,
    pub university: University,
    pub professors: Vec<ProfessorSummary>,
}

/// Candidate department for creation or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DepartmentDraft {
    #[serde(skip)]
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub university_id: Option<EntityId>,
}

impl DepartmentDraft {
    pub fn new(name: impl Into<String>, university_id: EntityId) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            university_id: Some(university_id),
        }
    }
}

impl From<&DepartmentFull> for DepartmentDraft {
    fn from(value: &DepartmentFull) -> Self {
        Self {
            id: Some(value.id),
            name: Some(value.name.clone()),
            university_id: Some(value.university.id),
        }
    }
}

/// Partial update body for a department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DepartmentPatch {
    pub name: Patch<String>,
    pub university_id: Patch<EntityId>,
}

impl DepartmentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.university_id.is_absent()
    }

    pub fn apply(self, draft: &mut DepartmentDraft) {
        self.name.apply(&mut draft.name);
        self.university_id.apply_reference(&mut draft.university_id);
    }
}
