//! Department repository contract and SQLite implementation.
//!
//! # Invariants
//! - `get_by_id` runs the department+university query first and only then
//!   the professor query.
//! - Departments listed by one `get` call that point at the same university
//!   share a single `Arc<University>`.

use crate::model::department::{Department, DepartmentDraft, DepartmentFull};
use crate::model::professor::ProfessorSummary;
use crate::model::university::University;
use crate::model::EntityId;
use crate::repo::{ensure_connection_ready, run_atomically, StoreError, StoreResult, Transactional};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::sync::Arc;

/// Persistence operations for departments.
pub trait DepartmentRepository: Transactional {
    /// Inserts `draft` and stores the assigned id back into it.
    fn add(&self, draft: &mut DepartmentDraft) -> StoreResult<EntityId>;
    /// Overwrites name and university; `false` when no row has `draft.id`.
    fn update(&self, draft: &DepartmentDraft) -> StoreResult<bool>;
    /// Deletes one row (cascading to professors); `false` when nothing matched.
    fn delete(&self, id: EntityId) -> StoreResult<bool>;
    /// Loads one department with its university and professors.
    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<DepartmentFull>>;
    /// Lists all departments ordered by id.
    fn get(&self) -> StoreResult<Vec<Department>>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Creates a repository over a connection with the campus schema applied.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Transactional for SqliteDepartmentRepository<'_> {
    fn atomically<T, E>(&self, work: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        run_atomically(self.conn, work)
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn add(&self, draft: &mut DepartmentDraft) -> StoreResult<EntityId> {
        self.conn.execute(
            "INSERT INTO departments (university_id, name) VALUES (?1, ?2);",
            params![draft.university_id, draft.name.as_deref()],
        )?;
        let id = self.conn.last_insert_rowid();
        draft.id = Some(id);
        Ok(id)
    }

    fn update(&self, draft: &DepartmentDraft) -> StoreResult<bool> {
        let Some(id) = draft.id else {
            return Ok(false);
        };
        let changed = self.conn.execute(
            "UPDATE departments
             SET university_id = ?1,
                 name = ?2
             WHERE id = ?3;",
            params![draft.university_id, draft.name.as_deref(), id],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: EntityId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<Option<DepartmentFull>> {
        let head = self
            .conn
            .query_row(
                "SELECT
                    d.id AS department_id,
                    d.name AS department_name,
                    u.id AS university_id,
                    u.name AS university_name,
                    u.city AS university_city
                 FROM departments d
                 INNER JOIN universities u ON u.id = d.university_id
                 WHERE d.id = ?1;",
                [id],
                |row| {
                    Ok((
                        row.get::<_, EntityId>("department_id")?,
                        row.get::<_, String>("department_name")?,
                        parse_joined_university(row)?,
                    ))
                },
            )
            .optional()?;
        let Some((id, name, university)) = head else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, name, phone_number, degree, birthday
             FROM professors
             WHERE department_id = ?1
             ORDER BY id ASC;",
        )?;
        let professors = stmt
            .query_map([id], |row| {
                Ok(ProfessorSummary {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    phone_number: row.get("phone_number")?,
                    degree: row.get("degree")?,
                    birthday: row.get("birthday")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(DepartmentFull {
            id,
            name,
            university,
            professors,
        }))
    }

    fn get(&self) -> StoreResult<Vec<Department>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                d.id AS department_id,
                d.name AS department_name,
                u.id AS university_id,
                u.name AS university_name,
                u.city AS university_city
             FROM departments d
             INNER JOIN universities u ON u.id = d.university_id
             ORDER BY d.id ASC;",
        )?;
        let mut rows = stmt.query([])?;

        let mut universities: HashMap<EntityId, Arc<University>> = HashMap::new();
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            let university = shared_university(&mut universities, row)?;
            departments.push(Department {
                id: row.get("department_id")?,
                name: row.get("department_name")?,
                university,
            });
        }
        Ok(departments)
    }
}

/// Reads the `university_*` aliased columns of a joined row.
pub(crate) fn parse_joined_university(row: &Row<'_>) -> rusqlite::Result<University> {
    Ok(University {
        id: row.get("university_id")?,
        name: row.get("university_name")?,
        city: row.get("university_city")?,
    })
}

/// Returns the arena instance for the row's university, creating it once.
pub(crate) fn shared_university(
    arena: &mut HashMap<EntityId, Arc<University>>,
    row: &Row<'_>,
) -> rusqlite::Result<Arc<University>> {
    let id: EntityId = row.get("university_id")?;
    if let Some(existing) = arena.get(&id) {
        return Ok(Arc::clone(existing));
    }
    let university = Arc::new(parse_joined_university(row)?);
    arena.insert(id, Arc::clone(&university));
    Ok(university)
}
