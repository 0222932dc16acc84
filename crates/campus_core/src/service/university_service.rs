//! University use-case service.

use crate::model::university::{University, UniversityDraft, UniversityFull, UniversityPatch};
use crate::model::EntityId;
use crate::repo::university_repo::UniversityRepository;
use crate::service::{record, ServiceError, ServiceResult};
use crate::validation::check_university;

/// Service facade over a university repository.
pub struct UniversityService<R: UniversityRepository> {
    repo: R,
}

impl<R: UniversityRepository> UniversityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts a university, returning the stored full view.
    pub fn add(&self, mut draft: UniversityDraft) -> ServiceResult<UniversityFull> {
        let result = self.repo.atomically(|| -> ServiceResult<UniversityFull> {
            check_university(&draft)?;
            let id = self.repo.add(&mut draft)?;
            self.repo
                .get_by_id(id)?
                .ok_or(ServiceError::InconsistentState(
                    "created university not found in read-back",
                ))
        });
        record("university_add", result)
    }

    /// Validates and persists an already merged candidate.
    ///
    /// Returns `false` when no university has `draft.id`.
    pub fn update(&self, draft: &UniversityDraft) -> ServiceResult<bool> {
        let result = self.repo.atomically(|| -> ServiceResult<bool> {
            check_university(draft)?;
            Ok(self.repo.update(draft)?)
        });
        record("university_update", result)
    }

    /// Loads university `id`, merges `patch`, validates and persists it.
    ///
    /// Returns `Ok(None)` without validating when the university is missing.
    pub fn patch(&self, id: EntityId, patch: UniversityPatch) -> ServiceResult<Option<UniversityFull>> {
        let result = self.repo.atomically(|| -> ServiceResult<Option<UniversityFull>> {
            let Some(current) = self.repo.get_by_id(id)? else {
                return Ok(None);
            };
            let mut draft = UniversityDraft::from(&current.university);
            patch.apply(&mut draft);

            check_university(&draft)?;
            if !self.repo.update(&draft)? {
                return Ok(None);
            }
            self.repo
                .get_by_id(id)?
                .ok_or(ServiceError::InconsistentState(
                    "updated university not found in read-back",
                ))
                .map(Some)
        });
        record("university_patch", result)
    }

    /// Deletes a university together with its departments and professors.
    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        record("university_delete", self.repo.delete(id).map_err(Into::into))
    }

    pub fn get_by_id(&self, id: EntityId) -> ServiceResult<Option<UniversityFull>> {
        record("university_get", self.repo.get_by_id(id).map_err(Into::into))
    }

    pub fn get(&self) -> ServiceResult<Vec<University>> {
        record("university_list", self.repo.get().map_err(Into::into))
    }
}
