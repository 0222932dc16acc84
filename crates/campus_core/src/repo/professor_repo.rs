//! Professor repository contract and SQLite implementation.
//!
//! # Invariants
//! - `get_by_id` returns the professor with its department and university
//!   materialized in one joined query.
//! - One `get` call shares department and university instances between
//!   professors that reference the same parents.

use crate::model::department::{Department, DepartmentParent};
use crate::model::professor::{Professor, ProfessorDraft, ProfessorFull};
use crate::model::university::University;
use crate::model::EntityId;
use crate::repo::department_repo::{parse_joined_university, shared_university};
use crate::repo::{ensure_connection_ready, run_atomically, StoreError, StoreResult, Transactional};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::Arc;

const PROFESSOR_CHAIN_SQL: &str = "SELECT
    p.id AS professor_id,
    p.name AS professor_name,
    p.phone_number AS phone_number,
    p.degree AS degree,
    p.birthday AS birthday,
    d.id AS department_id,
    d.name AS department_name,
    u.id AS university_id,
    u.name AS university_name,
    u.city AS university_city
FROM professors p
INNER JOIN departments d ON d.id = p.department_id
INNER JOIN universities u ON u.id = d.university_id";

/// Persistence operations for professors.
pub trait ProfessorRepository: Transactional {
    /// Inserts `draft` and stores the assigned id back into it.
    fn add(&self, draft: &mut ProfessorDraft) -> StoreResult<EntityId>;
    /// Overwrites every column; `false` when no row has `draft.id`.
    fn update(&self, draft: &ProfessorDraft) -> StoreResult<bool>;
    /// Deletes one row; `false` when nothing matched.
    fn delete(&self, id: EntityId) -> StoreResult<bool>;
    /// Loads one professor with its department and university.
    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<ProfessorFull>>;
    /// Lists all professors ordered by id.
    fn get(&self) -> StoreResult<Vec<Professor>>;
}

/// SQLite-backed professor repository.
pub struct SqliteProfessorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfessorRepository<'conn> {
    /// Creates a repository over a connection with the campus schema applied.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Transactional for SqliteProfessorRepository<'_> {
    fn atomically<T, E>(&self, work: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        run_atomically(self.conn, work)
    }
}

impl ProfessorRepository for SqliteProfessorRepository<'_> {
    fn add(&self, draft: &mut ProfessorDraft) -> StoreResult<EntityId> {
        self.conn.execute(
            "INSERT INTO professors (
                department_id,
                name,
                phone_number,
                degree,
                birthday
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.department_id,
                draft.name.as_deref(),
                draft.phone_number.as_deref(),
                draft.degree.as_deref(),
                draft.birthday,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        draft.id = Some(id);
        Ok(id)
    }

    fn update(&self, draft: &ProfessorDraft) -> StoreResult<bool> {
        let Some(id) = draft.id else {
            return Ok(false);
        };
        let changed = self.conn.execute(
            "UPDATE professors
             SET department_id = ?1,
                 name = ?2,
                 phone_number = ?3,
                 degree = ?4,
                 birthday = ?5
             WHERE id = ?6;",
            params![
                draft.department_id,
                draft.name.as_deref(),
                draft.phone_number.as_deref(),
                draft.degree.as_deref(),
                draft.birthday,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: EntityId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM professors WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<ProfessorFull>> {
        let professor = self
            .conn
            .query_row(
                &format!("{PROFESSOR_CHAIN_SQL} WHERE p.id = ?1;"),
                [id],
                |row| {
                    Ok(ProfessorFull {
                        id: row.get("professor_id")?,
                        name: row.get("professor_name")?,
                        phone_number: row.get("phone_number")?,
                        degree: row.get("degree")?,
                        birthday: row.get("birthday")?,
                        department: DepartmentParent {
                            id: row.get("department_id")?,
                            name: row.get("department_name")?,
                            university: parse_joined_university(row)?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(professor)
    }

    fn get(&self) -> StoreResult<Vec<Professor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFESSOR_CHAIN_SQL} ORDER BY p.id ASC;"))?;
        let mut rows = stmt.query([])?;

        let mut universities: HashMap<EntityId, Arc<University>> = HashMap::new();
        let mut departments: HashMap<EntityId, Arc<Department>> = HashMap::new();
        let mut professors = Vec::new();
        while let Some(row) = rows.next()? {
            let department_id: EntityId = row.get("department_id")?;
            let department = match departments.get(&department_id) {
                Some(existing) => Arc::clone(existing),
                None => {
                    let department = Arc::new(Department {
                        id: department_id,
                        name: row.get("department_name")?,
                        university: shared_university(&mut universities, row)?,
                    });
                    departments.insert(department_id, Arc::clone(&department));
                    department
                }
            };

            professors.push(Professor {
                id: row.get("professor_id")?,
                name: row.get("professor_name")?,
                phone_number: row.get("phone_number")?,
                degree: row.get("degree")?,
                birthday: row.get("birthday")?,
                department,
            });
        }
        Ok(professors)
    }
}
