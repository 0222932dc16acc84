//! Campus use-case services.
//!
//! # Responsibility
//! - Run validate → persist → re-read for creations and partial updates.
//! - Collapse store failures into one internal-error kind.
//! - Keep callers (HTTP layer, CLI) decoupled from SQL.
//!
//! # Invariants
//! - Validation failures and absence are returned as values, never panics.
//! - Store failures are never swallowed.
//! - `add` and `patch` each run in a single store transaction, so a row
//!   cannot vanish between write and read-back.

use crate::repo::department_repo::SqliteDepartmentRepository;
use crate::repo::professor_repo::SqliteProfessorRepository;
use crate::repo::university_repo::SqliteUniversityRepository;
use crate::repo::{ensure_connection_ready, StoreError, StoreResult};
use crate::validation::ValidationError;
use log::{debug, error, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_service;
pub mod professor_service;
pub mod university_service;

pub use department_service::DepartmentService;
pub use professor_service::ProfessorService;
pub use university_service::UniversityService;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Candidate entity broke a validation rule; client input error.
    Validation(ValidationError),
    /// Store-layer failure; not recoverable by the caller.
    Internal(StoreError),
    /// A write succeeded but its read-back disagreed.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Internal(err) => write!(f, "internal store error: {err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent campus state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Internal(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Internal(value)
    }
}

/// Logs the outcome of one service call and hands it back unchanged.
pub(crate) fn record<T>(event: &'static str, result: ServiceResult<T>) -> ServiceResult<T> {
    match &result {
        Ok(_) => debug!("event={event} module=service status=ok"),
        Err(ServiceError::Validation(err)) => {
            warn!("event={event} module=service status=rejected reason=\"{err}\"")
        }
        Err(err) => error!("event={event} module=service status=error error={err}"),
    }
    result
}

pub type SqliteUniversityService<'conn> = UniversityService<SqliteUniversityRepository<'conn>>;
pub type SqliteDepartmentService<'conn> =
    DepartmentService<SqliteDepartmentRepository<'conn>, SqliteUniversityRepository<'conn>>;
pub type SqliteProfessorService<'conn> =
    ProfessorService<SqliteProfessorRepository<'conn>, SqliteDepartmentRepository<'conn>>;

/// Binds the three SQLite-backed services to one connection.
pub struct Campus<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Campus<'conn> {
    /// Wraps a connection that already carries the campus schema.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub fn universities(&self) -> SqliteUniversityService<'conn> {
        UniversityService::new(SqliteUniversityRepository::new_unchecked(self.conn))
    }

    pub fn departments(&self) -> SqliteDepartmentService<'conn> {
        DepartmentService::new(
            SqliteDepartmentRepository::new_unchecked(self.conn),
            SqliteUniversityRepository::new_unchecked(self.conn),
        )
    }

    pub fn professors(&self) -> SqliteProfessorService<'conn> {
        ProfessorService::new(
            SqliteProfessorRepository::new_unchecked(self.conn),
            SqliteDepartmentRepository::new_unchecked(self.conn),
        )
    }
}
