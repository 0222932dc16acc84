//! University model.
//!
//! # Invariants
//! - Stored universities always have a non-null `name` and `city`.
//! - `UniversityFull::departments` entries carry no university back-reference.

use crate::model::department::DepartmentSummary;
use crate::model::patch::Patch;
use crate::model::{EntityId, Identified};
use serde::{Deserialize, Serialize};

/// University row as stored. Used for list views and as a nested parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: EntityId,
    pub name: String,
    pub city: String,
}

impl Identified for University {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// University with its department list (single-resource view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversityFull {
    #[serde(flatten)]
    pub university: University,
    pub departments: Vec<DepartmentSummary>,
}

/// Candidate university for creation or update.
///
/// Deserializes from a creation body; `id` is never read from the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UniversityDraft {
    #[serde(skip)]
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl UniversityDraft {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            city: Some(city.into()),
        }
    }
}

impl From<&University> for UniversityDraft {
    fn from(value: &University) -> Self {
        Self {
            id: Some(value.id),
            name: Some(value.name.clone()),
            city: Some(value.city.clone()),
        }
    }
}

/// Partial update body for a university.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UniversityPatch {
    pub name: Patch<String>,
    pub city: Patch<String>,
}

impl UniversityPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.city.is_absent()
    }

    /// Merges every mentioned field into `draft`.
    pub fn apply(self, draft: &mut UniversityDraft) {
        self.name.apply(&mut draft.name);
        self.city.apply(&mut draft.city);
    }
}
