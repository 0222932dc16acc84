//! Write-path validation rules.
//!
//! # Invariants
//! - Own-field checks run first, in field declaration order; the parent
//!   existence check runs last.
//! - Only the first violation is reported.
//! - A store failure during the parent lookup is an internal error, not a
//!   validation error.

use crate::model::department::DepartmentDraft;
use crate::model::professor::ProfessorDraft;
use crate::model::university::UniversityDraft;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::university_repo::UniversityRepository;
use crate::service::ServiceResult;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First rule violated by a candidate entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    UniversityNameMissing,
    UniversityCityMissing,
    DepartmentNameMissing,
    DepartmentUniversityNotFound,
    ProfessorNameMissing,
    ProfessorPhoneNumberMissing,
    ProfessorDegreeMissing,
    ProfessorBirthdayMissing,
    ProfessorDepartmentNotFound,
}

impl ValidationError {
    /// Client-facing description of the violated rule.
    pub fn message(self) -> &'static str {
        match self {
            Self::UniversityNameMissing => "Name of university cannot be null",
            Self::UniversityCityMissing => "City of university cannot be null",
            Self::DepartmentNameMissing => "Name of department cannot be null",
            Self::DepartmentUniversityNotFound => "University of department does not exist",
            Self::ProfessorNameMissing => "Professor's name cannot be null",
            Self::ProfessorPhoneNumberMissing => "Professor's phone number cannot be null",
            Self::ProfessorDegreeMissing => "Professor's degree cannot be null",
            Self::ProfessorBirthdayMissing => "Professor's birthday cannot be null",
            Self::ProfessorDepartmentNotFound => "Department does not exist",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

fn require<T>(value: &Option<T>, violation: ValidationError) -> Result<(), ValidationError> {
    match value {
        Some(_) => Ok(()),
        None => Err(violation),
    }
}

/// Checks a university candidate.
pub fn check_university(draft: &UniversityDraft) -> Result<(), ValidationError> {
    require(&draft.name, ValidationError::UniversityNameMissing)?;
    require(&draft.city, ValidationError::UniversityCityMissing)
}

/// Checks a department candidate, resolving its university last.
pub fn check_department<U>(draft: &DepartmentDraft, universities: &U) -> ServiceResult<()>
where
    U: UniversityRepository,
{
    require(&draft.name, ValidationError::DepartmentNameMissing)?;

    let resolved = match draft.university_id {
        Some(university_id) => universities.get_by_id(university_id)?.is_some(),
        None => false,
    };
    if !resolved {
        return Err(ValidationError::DepartmentUniversityNotFound.into());
    }
    Ok(())
}

/// Checks a professor candidate, resolving its department last.
pub fn check_professor<D>(draft: &ProfessorDraft, departments: &D) -> ServiceResult<()>
where
    D: DepartmentRepository,
{
    require(&draft.name, ValidationError::ProfessorNameMissing)?;
    require(&draft.phone_number, ValidationError::ProfessorPhoneNumberMissing)?;
    require(&draft.degree, ValidationError::ProfessorDegreeMissing)?;
    require(&draft.birthday, ValidationError::ProfessorBirthdayMissing)?;

    let resolved = match draft.department_id {
        Some(department_id) => departments.get_by_id(department_id)?.is_some(),
        None => false,
    };
    if !resolved {
        return Err(ValidationError::ProfessorDepartmentNotFound.into());
    }
    Ok(())
}
