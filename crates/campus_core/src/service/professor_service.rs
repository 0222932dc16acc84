//! Professor use-case service.

use crate::model::professor::{Professor, ProfessorDraft, ProfessorFull, ProfessorPatch};
use crate::model::EntityId;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::professor_repo::ProfessorRepository;
use crate::service::{record, ServiceError, ServiceResult};
use crate::validation::check_professor;

/// Service facade over professor storage, validating against departments.
pub struct ProfessorService<R: ProfessorRepository, D: DepartmentRepository> {
    repo: R,
    departments: D,
}

impl<R: ProfessorRepository, D: DepartmentRepository> ProfessorService<R, D> {
    pub fn new(repo: R, departments: D) -> Self {
        Self { repo, departments }
    }

    /// Validates and inserts a professor, returning the stored full view.
    pub fn add(&self, mut draft: ProfessorDraft) -> ServiceResult<ProfessorFull> {
        let result = self.repo.atomically(|| -> ServiceResult<ProfessorFull> {
            check_professor(&draft, &self.departments)?;
            let id = self.repo.add(&mut draft)?;
            self.repo
                .get_by_id(id)?
                .ok_or(ServiceError::InconsistentState(
                    "created professor not found in read-back",
                ))
        });
        record("professor_add", result)
    }

    /// Validates and persists an already merged candidate.
    pub fn update(&self, draft: &ProfessorDraft) -> ServiceResult<bool> {
        let result = self.repo.atomically(|| -> ServiceResult<bool> {
            check_professor(draft, &self.departments)?;
            Ok(self.repo.update(draft)?)
        });
        record("professor_update", result)
    }

    /// Loads professor `id`, merges `patch`, validates and persists it.
    pub fn patch(&self, id: EntityId, patch: ProfessorPatch) -> ServiceResult<Option<ProfessorFull>> {
        let result = self.repo.atomically(|| -> ServiceResult<Option<ProfessorFull>> {
            let Some(current) = self.repo.get_by_id(id)? else {
                return Ok(None);
            };
            let mut draft = ProfessorDraft::from(&current);
            patch.apply(&mut draft);

            check_professor(&draft, &self.departments)?;
            if !self.repo.update(&draft)? {
                return Ok(None);
            }
            self.repo
                .get_by_id(id)?
                .ok_or(ServiceError::InconsistentState(
                    "updated professor not found in read-back",
                ))
                .map(Some)
        });
        record("professor_patch", result)
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        record("professor_delete", self.repo.delete(id).map_err(Into::into))
    }

    pub fn get_by_id(&self, id: EntityId) -> ServiceResult<Option<ProfessorFull>> {
        record("professor_get", self.repo.get_by_id(id).map_err(Into::into))
    }

    pub fn get(&self) -> ServiceResult<Vec<Professor>> {
        record("professor_list", self.repo.get().map_err(Into::into))
    }
}
