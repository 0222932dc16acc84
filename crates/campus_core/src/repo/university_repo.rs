//! University repository contract and SQLite implementation.
//!
//! # Invariants
//! - `get_by_id` reads the row first and skips the department query when the
//!   row is missing.
//! - Deleting a university cascades to its departments and their professors
//!   through the schema's foreign keys.

use crate::model::department::DepartmentSummary;
use crate::model::university::{University, UniversityDraft, UniversityFull};
use crate::model::EntityId;
use crate::repo::{ensure_connection_ready, run_atomically, StoreError, StoreResult, Transactional};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Persistence operations for universities.
pub trait UniversityRepository: Transactional {
    /// Inserts `draft` and stores the assigned id back into it.
    fn add(&self, draft: &mut UniversityDraft) -> StoreResult<EntityId>;
    /// Overwrites name and city; `false` when no row has `draft.id`.
    fn update(&self, draft: &UniversityDraft) -> StoreResult<bool>;
    /// Deletes one row; `false` when nothing matched.
    fn delete(&self, id: EntityId) -> StoreResult<bool>;
    /// Loads one university with its departments.
    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<UniversityFull>>;
    /// Lists all universities ordered by id.
    fn get(&self) -> StoreResult<Vec<University>>;
}

/// SQLite-backed university repository.
pub struct SqliteUniversityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUniversityRepository<'conn> {
    /// Creates a repository over a connection with the campus schema applied.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Transactional for SqliteUniversityRepository<'_> {
    fn atomically<T, E>(&self, work: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        run_atomically(self.conn, work)
    }
}

impl UniversityRepository for SqliteUniversityRepository<'_> {
    fn add(&self, draft: &mut UniversityDraft) -> StoreResult<EntityId> {
        self.conn.execute(
            "INSERT INTO universities (name, city) VALUES (?1, ?2);",
            params![draft.name.as_deref(), draft.city.as_deref()],
        )?;
        let id = self.conn.last_insert_rowid();
        draft.id = Some(id);
        Ok(id)
    }

    fn update(&self, draft: &UniversityDraft) -> StoreResult<bool> {
        let Some(id) = draft.id else {
            return Ok(false);
        };
        let changed = self.conn.execute(
            "UPDATE universities
             SET name = ?1,
                 city = ?2
             WHERE id = ?3;",
            params![draft.name.as_deref(), draft.city.as_deref(), id],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: EntityId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM universities WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<UniversityFull>> {
        let university = self
            .conn
            .query_row(
                "SELECT id, name, city FROM universities WHERE id = ?1;",
                [id],
                parse_university_row,
            )
            .optional()?;
        let Some(university) = university else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, name
             FROM departments
             WHERE university_id = ?1
             ORDER BY id ASC;",
        )?;
        let departments = stmt
            .query_map([id], |row| {
                Ok(DepartmentSummary {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(UniversityFull {
            university,
            departments,
        }))
    }

    fn get(&self) -> StoreResult<Vec<University>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, city FROM universities ORDER BY id ASC;")?;
        let universities = stmt
            .query_map([], parse_university_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(universities)
    }
}

fn parse_university_row(row: &Row<'_>) -> rusqlite::Result<University> {
    Ok(University {
        id: row.get("id")?,
        name: row.get("name")?,
        city: row.get("city")?,
    })
}
