use campus_core::db::open_db_in_memory;
use campus_core::{
    Campus, DepartmentDraft, DepartmentPatch, Patch, ProfessorDraft, ProfessorPatch,
    ServiceError, UniversityDraft, UniversityPatch, ValidationError,
};
use chrono::NaiveDate;

fn validation_error(err: ServiceError) -> ValidationError {
    match err {
        ServiceError::Validation(violation) => violation,
        other => panic!("expected validation error, got: {other}"),
    }
}

fn ivan(department_id: i64) -> ProfessorDraft {
    ProfessorDraft::new(
        "Ivan",
        "+79998884334",
        "PhD in Computer Science",
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        department_id,
    )
}

#[test]
fn create_university_then_department_scenario() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let university = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap();
    assert_eq!(university.university.id, 1);
    assert_eq!(university.university.name, "PSTU");
    assert_eq!(university.university.city, "Perm");

    let department = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", 1))
        .unwrap();
    assert_eq!(department.name, "ITAS");
    assert_eq!(department.university, university.university);

    let err = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", 999))
        .unwrap_err();
    let violation = validation_error(err);
    assert_eq!(violation, ValidationError::DepartmentUniversityNotFound);
    assert_eq!(violation.to_string(), "University of department does not exist");
    assert_eq!(campus.departments().get().unwrap().len(), 1);
}

#[test]
fn created_entities_roundtrip_through_get_by_id() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let university = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap();
    let department = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", university.university.id))
        .unwrap();
    let professor = campus.professors().add(ivan(department.id)).unwrap();

    assert_ne!(professor.id, 0);
    let reread = campus.professors().get_by_id(professor.id).unwrap().unwrap();
    assert_eq!(reread, professor);
    assert_eq!(reread.department.university.city, "Perm");
}

#[test]
fn department_name_is_reported_before_missing_university() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let draft = DepartmentDraft {
        id: None,
        name: None,
        university_id: Some(999),
    };
    let err = campus.departments().add(draft).unwrap_err();
    assert_eq!(validation_error(err), ValidationError::DepartmentNameMissing);
}

#[test]
fn department_without_university_reference_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let draft = DepartmentDraft {
        id: None,
        name: Some("ITAS".to_string()),
        university_id: None,
    };
    let err = campus.departments().add(draft).unwrap_err();
    assert_eq!(
        validation_error(err),
        ValidationError::DepartmentUniversityNotFound
    );
}

#[test]
fn professor_fields_are_checked_in_declaration_order() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let mut draft = ProfessorDraft {
        department_id: Some(999),
        ..ProfessorDraft::default()
    };
    let expected = [
        ValidationError::ProfessorNameMissing,
        ValidationError::ProfessorPhoneNumberMissing,
        ValidationError::ProfessorDegreeMissing,
        ValidationError::ProfessorBirthdayMissing,
        ValidationError::ProfessorDepartmentNotFound,
    ];
    for (step, violation) in expected.into_iter().enumerate() {
        let err = campus.professors().add(draft.clone()).unwrap_err();
        assert_eq!(validation_error(err), violation, "step {step}");
        match step {
            0 => draft.name = Some("Ivan".to_string()),
            1 => draft.phone_number = Some("+79998884334".to_string()),
            2 => draft.degree = Some("PhD".to_string()),
            3 => draft.birthday = NaiveDate::from_ymd_opt(1970, 1, 1),
            _ => {}
        }
    }
    assert!(campus.professors().get().unwrap().is_empty());
}

#[test]
fn deleting_university_cascades_to_departments_and_professors() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let pstu = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap()
        .university
        .id;
    let msu = campus
        .universities()
        .add(UniversityDraft::new("MSU", "Moscow"))
        .unwrap()
        .university
        .id;
    let itas = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", pstu))
        .unwrap()
        .id;
    let math = campus
        .departments()
        .add(DepartmentDraft::new("Math", msu))
        .unwrap()
        .id;
    let doomed = campus.professors().add(ivan(itas)).unwrap().id;
    let survivor = campus.professors().add(ivan(math)).unwrap().id;

    assert!(campus.universities().delete(pstu).unwrap());
    assert!(!campus.universities().delete(pstu).unwrap());

    assert!(campus.universities().get_by_id(pstu).unwrap().is_none());
    assert!(campus.departments().get_by_id(itas).unwrap().is_none());
    assert!(campus.professors().get_by_id(doomed).unwrap().is_none());
    assert!(campus.professors().get_by_id(survivor).unwrap().is_some());
    assert_eq!(campus.departments().get().unwrap().len(), 1);
}

#[test]
fn empty_patch_leaves_entity_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let created = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap();
    let patch = UniversityPatch::default();
    assert!(patch.is_empty());

    let patched = campus
        .universities()
        .patch(created.university.id, patch)
        .unwrap()
        .unwrap();
    assert_eq!(patched, created);
}

#[test]
fn patch_overwrites_only_mentioned_fields() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let university_id = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap()
        .university
        .id;
    let department_id = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", university_id))
        .unwrap()
        .id;
    let created = campus.professors().add(ivan(department_id)).unwrap();

    let patch = ProfessorPatch {
        degree: Patch::Value("Doctor of Science".to_string()),
        ..ProfessorPatch::default()
    };
    let patched = campus
        .professors()
        .patch(created.id, patch)
        .unwrap()
        .unwrap();

    assert_eq!(patched.degree, "Doctor of Science");
    assert_eq!(patched.name, created.name);
    assert_eq!(patched.phone_number, created.phone_number);
    assert_eq!(patched.birthday, created.birthday);
    assert_eq!(patched.department, created.department);
}

#[test]
fn patch_with_null_required_field_is_rejected_and_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let university_id = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap()
        .university
        .id;
    let department_id = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", university_id))
        .unwrap()
        .id;
    let created = campus.professors().add(ivan(department_id)).unwrap();

    let patch = ProfessorPatch {
        phone_number: Patch::Null,
        ..ProfessorPatch::default()
    };
    let err = campus.professors().patch(created.id, patch).unwrap_err();
    assert_eq!(
        validation_error(err),
        ValidationError::ProfessorPhoneNumberMissing
    );

    let stored = campus.professors().get_by_id(created.id).unwrap().unwrap();
    assert_eq!(stored.phone_number, "+79998884334");
}

#[test]
fn null_university_reference_fails_existence_check() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let university_id = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap()
        .university
        .id;
    let department_id = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", university_id))
        .unwrap()
        .id;

    let patch = DepartmentPatch {
        university_id: Patch::Null,
        ..DepartmentPatch::default()
    };
    let err = campus.departments().patch(department_id, patch).unwrap_err();
    assert_eq!(
        validation_error(err),
        ValidationError::DepartmentUniversityNotFound
    );
}

#[test]
fn patch_can_move_department_to_another_university() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let pstu = campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap()
        .university
        .id;
    let psu = campus
        .universities()
        .add(UniversityDraft::new("PSU", "Perm"))
        .unwrap()
        .university
        .id;
    let department_id = campus
        .departments()
        .add(DepartmentDraft::new("ITAS", pstu))
        .unwrap()
        .id;

    let patch = DepartmentPatch {
        university_id: Patch::Value(psu),
        ..DepartmentPatch::default()
    };
    let moved = campus
        .departments()
        .patch(department_id, patch)
        .unwrap()
        .unwrap();
    assert_eq!(moved.university.id, psu);
    assert_eq!(moved.name, "ITAS");

    let pstu_full = campus.universities().get_by_id(pstu).unwrap().unwrap();
    assert!(pstu_full.departments.is_empty());
}

#[test]
fn patch_of_missing_entity_is_none() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let patch = UniversityPatch {
        name: Patch::Null,
        ..UniversityPatch::default()
    };
    assert!(campus.universities().patch(5, patch).unwrap().is_none());
}

#[test]
fn update_validates_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    let mut ghost = UniversityDraft::new("Ghost", "Nowhere");
    ghost.id = Some(404);
    assert!(!campus.universities().update(&ghost).unwrap());

    ghost.city = None;
    let err = campus.universities().update(&ghost).unwrap_err();
    assert_eq!(validation_error(err), ValidationError::UniversityCityMissing);
}

#[test]
fn service_calls_join_an_open_outer_transaction() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    conn.execute_batch("BEGIN;").unwrap();
    campus
        .universities()
        .add(UniversityDraft::new("PSTU", "Perm"))
        .unwrap();
    assert_eq!(campus.universities().get().unwrap().len(), 1);
    conn.execute_batch("ROLLBACK;").unwrap();

    assert!(campus.universities().get().unwrap().is_empty());
}

#[test]
fn lists_are_empty_on_fresh_store() {
    let conn = open_db_in_memory().unwrap();
    let campus = Campus::try_new(&conn).unwrap();

    assert!(campus.universities().get().unwrap().is_empty());
    assert!(campus.departments().get().unwrap().is_empty());
    assert!(campus.professors().get().unwrap().is_empty());
}
