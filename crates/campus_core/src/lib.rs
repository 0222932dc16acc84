//! Core persistence and validation engine for the campus registry.
//! Universities own departments, departments own professors; this crate is
//! the single source of truth for those ownership and update rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{
    Department, DepartmentDraft, DepartmentFull, DepartmentParent, DepartmentPatch,
    DepartmentSummary,
};
pub use model::patch::Patch;
pub use model::professor::{
    Professor, ProfessorDraft, ProfessorFull, ProfessorPatch, ProfessorSummary,
};
pub use model::university::{University, UniversityDraft, UniversityFull, UniversityPatch};
pub use model::{EntityId, UNRESOLVED_REFERENCE};
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::professor_repo::{ProfessorRepository, SqliteProfessorRepository};
pub use repo::university_repo::{SqliteUniversityRepository, UniversityRepository};
pub use repo::{StoreError, StoreResult, Transactional};
pub use service::{
    Campus, DepartmentService, ProfessorService, ServiceError, ServiceResult, UniversityService,
};
pub use validation::ValidationError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
