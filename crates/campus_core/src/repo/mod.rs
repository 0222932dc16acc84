//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Report absence as `Ok(None)` / `Ok(false)`, never as an error.
//! - Surface every store failure as `StoreError` without interpreting it.
//!
//! # Invariants
//! - Repositories do not validate; callers validate before writing.
//! - SQLite repositories only accept connections at the latest schema.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod professor_repo;
pub mod university_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure originating from the store.
#[derive(Debug)]
pub enum StoreError {
    /// Driver, connectivity or constraint failure.
    Db(DbError),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted row cannot be converted into a read model.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "campus repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted campus data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Unit-of-work boundary offered by every repository.
pub trait Transactional {
    /// Runs `work` as one atomic store operation.
    ///
    /// Commits when `work` returns `Ok`, rolls back otherwise.
    fn atomically<T, E>(&self, work: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;
}

/// Runs `work` inside an immediate transaction on `conn`.
///
/// When the connection already has an open transaction, `work` joins it and
/// the outer owner decides commit or rollback.
pub(crate) fn run_atomically<T, E>(
    conn: &Connection,
    work: impl FnOnce() -> Result<T, E>,
) -> Result<T, E>
where
    E: From<StoreError>,
{
    if !conn.is_autocommit() {
        return work();
    }

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(StoreError::from)?;
    let value = work()?;
    tx.commit().map_err(StoreError::from)?;
    Ok(value)
}

pub(crate) fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
