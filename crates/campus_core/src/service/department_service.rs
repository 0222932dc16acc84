//! Department use-case service.

use crate::model::department::{Department, DepartmentDraft, DepartmentFull, DepartmentPatch};
use crate::model::EntityId;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::university_repo::UniversityRepository;
use crate::service::{record, ServiceError, ServiceResult};
use crate::validation::check_department;

/// Service facade over department storage, validating against universities.
pub struct DepartmentService<R: DepartmentRepository, U: UniversityRepository> {
    repo: R,
    universities: U,
}

impl<R: DepartmentRepository, U: UniversityRepository> DepartmentService<R, U> {
    pub fn new(repo: R, universities: U) -> Self {
        Self { repo, universities }
    }

    /// Validates and inserts a department, returning the stored full view.
    pub fn add(&self, mut draft: DepartmentDraft) -> ServiceResult<DepartmentFull> {
        let result = self.repo.atomically(|| -> ServiceResult<DepartmentFull> {
            check_department(&draft, &self.universities)?;
            let id = self.repo.add(&mut draft)?;
            self.repo
                .get_by_id(id)?
                .ok_or(ServiceError::InconsistentState(
                    "created department not found in read-back",
                ))
        });
        record("department_add", result)
    }

    /// Validates and persists an already merged candidate.
    pub fn update(&self, draft: &DepartmentDraft) -> ServiceResult<bool> {
        let result = self.repo.atomically(|| -> ServiceResult<bool> {
            check_department(draft, &self.universities)?;
            Ok(self.repo.update(draft)?)
        });
        record("department_update", result)
    }

    /// Loads department `id`, merges `patch`, validates and persists it.
    ///
    /// An explicit `null` university reference is rejected by validation.
    pub fn patch(&self, id: EntityId, patch: DepartmentPatch) -> ServiceResult<Option<DepartmentFull>> {
        let result = self.repo.atomically(|| -> ServiceResult<Option<DepartmentFull>> {
            let Some(current) = self.repo.get_by_id(id)? else {
                return Ok(None);
            };
            let mut draft = DepartmentDraft::from(&current);
            patch.apply(&mut draft);

            check_department(&draft, &self.universities)?;
            if !self.repo.update(&draft)? {
                return Ok(None);
            }
            self.repo
                .get_by_id(id)?
                .ok_or(ServiceError::InconsistentState(
                    "updated department not found in read-back",
                ))
                .map(Some)
        });
        record("department_patch", result)
    }

    /// Deletes a department together with its professors.
    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        record("department_delete", self.repo.delete(id).map_err(Into::into))
    }

    pub fn get_by_id(&self, id: EntityId) -> ServiceResult<Option<DepartmentFull>> {
        record("department_get", self.repo.get_by_id(id).map_err(Into::into))
    }

    pub fn get(&self) -> ServiceResult<Vec<Department>> {
        record("department_list", self.repo.get().map_err(Into::into))
    }
}
