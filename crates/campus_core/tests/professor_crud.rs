use campus_core::db::open_db_in_memory;
use campus_core::{
    DepartmentDraft, DepartmentRepository, EntityId, ProfessorDraft, ProfessorRepository,
    SqliteDepartmentRepository, SqliteProfessorRepository, SqliteUniversityRepository,
    StoreError, UniversityDraft, UniversityRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::Arc;

fn seed_department(conn: &Connection, name: &str) -> EntityId {
    let university_id = SqliteUniversityRepository::try_new(conn)
        .unwrap()
        .add(&mut UniversityDraft::new("PSTU", "Perm"))
        .unwrap();
    SqliteDepartmentRepository::try_new(conn)
        .unwrap()
        .add(&mut DepartmentDraft::new(name, university_id))
        .unwrap()
}

fn ivan(department_id: EntityId) -> ProfessorDraft {
    ProfessorDraft::new(
        "Ivan",
        "+79998884334",
        "PhD in Computer Science",
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        department_id,
    )
}

#[test]
fn get_by_id_materializes_department_and_university() {
    let conn = open_db_in_memory().unwrap();
    let department_id = seed_department(&conn, "ITAS");
    let repo = SqliteProfessorRepository::try_new(&conn).unwrap();

    let mut draft = ivan(department_id);
    let id = repo.add(&mut draft).unwrap();
    assert_eq!(draft.id, Some(id));

    let full = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(full.name, "Ivan");
    assert_eq!(full.phone_number, "+79998884334");
    assert_eq!(full.degree, "PhD in Computer Science");
    assert_eq!(full.birthday, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    assert_eq!(full.department.id, department_id);
    assert_eq!(full.department.name, "ITAS");
    assert_eq!(full.department.university.name, "PSTU");
}

#[test]
fn add_without_birthday_is_store_error() {
    let conn = open_db_in_memory().unwrap();
    let department_id = seed_department(&conn, "ITAS");
    let repo = SqliteProfessorRepository::try_new(&conn).unwrap();

    let mut draft = ivan(department_id);
    draft.birthday = None;
    assert!(matches!(repo.add(&mut draft).unwrap_err(), StoreError::Db(_)));
}

#[test]
fn get_shares_department_and_university_instances() {
    let conn = open_db_in_memory().unwrap();
    let department_id = seed_department(&conn, "ITAS");
    let repo = SqliteProfessorRepository::try_new(&conn).unwrap();

    repo.add(&mut ivan(department_id)).unwrap();
    let mut petr = ivan(department_id);
    petr.name = Some("Petr".to_string());
    repo.add(&mut petr).unwrap();

    let all = repo.get().unwrap();
    assert_eq!(all.len(), 2);
    assert!(Arc::ptr_eq(&all[0].department, &all[1].department));
    assert!(Arc::ptr_eq(
        &all[0].department.university,
        &all[1].department.university
    ));
    assert_eq!(all[1].department_id(), department_id);
}

#[test]
fn update_overwrites_every_column() {
    let conn = open_db_in_memory().unwrap();
    let first_department = seed_department(&conn, "ITAS");
    let second_department = seed_department(&conn, "AT");
    let repo = SqliteProfessorRepository::try_new(&conn).unwrap();

    let mut draft = ivan(first_department);
    let id = repo.add(&mut draft).unwrap();

    draft.degree = Some("Doctor of Science".to_string());
    draft.birthday = NaiveDate::from_ymd_opt(1971, 2, 3);
    draft.department_id = Some(second_department);
    assert!(repo.update(&draft).unwrap());

    let full = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(full.degree, "Doctor of Science");
    assert_eq!(full.birthday, NaiveDate::from_ymd_opt(1971, 2, 3).unwrap());
    assert_eq!(full.department.id, second_department);
    assert_eq!(full.department.name, "AT");
}

#[test]
fn delete_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let department_id = seed_department(&conn, "ITAS");
    let repo = SqliteProfessorRepository::try_new(&conn).unwrap();

    let id = repo.add(&mut ivan(department_id)).unwrap();
    assert!(repo.delete(id).unwrap());
    assert!(repo.get_by_id(id).unwrap().is_none());
    assert!(!repo.delete(id).unwrap());
    assert!(repo.get().unwrap().is_empty());
}
