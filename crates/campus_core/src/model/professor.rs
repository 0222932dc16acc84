//! Professor model.
//!
//! # Invariants
//! - A stored professor references an existing department and has every
//!   attribute set.
//! - `birthday` is a calendar date without time or zone.

use crate::model::department::{Department, DepartmentParent};
use crate::model::patch::Patch;
use crate::model::{serialize_parent_id, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Professor list entry. Serializes its parent as `department_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Professor {
    pub id: EntityId,
    pub name: String,
    pub phone_number: String,
    pub degree: String,
    pub birthday: NaiveDate,
    #[serde(rename = "department_id", serialize_with = "serialize_parent_id")]
    pub department: Arc<Department>,
}

impl Professor {
    pub fn department_id(&self) -> EntityId {
        self.department.id
    }
}

/// Professor as a child inside `DepartmentFull`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessorSummary {
    pub id: EntityId,
    pub name: String,
    pub phone_number: String,
    pub degree: String,
    pub birthday: NaiveDate,
}

/// Professor with the full department → university chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessorFull {
    pub id: EntityId,
    pub name: String,
    pub phone_number: String,
    pub degree: String,
    pub birthday: NaiveDate,
    pub department: DepartmentParent,
}

/// Candidate professor for creation or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfessorDraft {
    #[serde(skip)]
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub degree: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub department_id: Option<EntityId>,
}

impl ProfessorDraft {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        degree: impl Into<String>,
        birthday: NaiveDate,
        department_id: EntityId,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            phone_number: Some(phone_number.into()),
            degree: Some(degree.into()),
            birthday: Some(birthday),
            department_id: Some(department_id),
        }
    }
}

impl From<&ProfessorFull> for ProfessorDraft {
    fn from(value: &ProfessorFull) -> Self {
        Self {
            id: Some(value.id),
            name: Some(value.name.clone()),
            phone_number: Some(value.phone_number.clone()),
            degree: Some(value.degree.clone()),
            birthday: Some(value.birthday),
            department_id: Some(value.department.id),
        }
    }
}

/// Partial update body for a professor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfessorPatch {
    pub name: Patch<String>,
    pub phone_number: Patch<String>,
    pub degree: Patch<String>,
    pub birthday: Patch<NaiveDate>,
    pub department_id: Patch<EntityId>,
}

impl ProfessorPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.phone_number.is_absent()
            && self.degree.is_absent()
            && self.birthday.is_absent()
            && self.department_id.is_absent()
    }

    pub fn apply(self, draft: &mut ProfessorDraft) {
        self.name.apply(&mut draft.name);
        self.phone_number.apply(&mut draft.phone_number);
        self.degree.apply(&mut draft.degree);
        self.birthday.apply(&mut draft.birthday);
        self.department_id.apply_reference(&mut draft.department_id);
    }
}
