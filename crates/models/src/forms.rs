//! Submitted forms for every editable table.
//!
//! `clean` strips surrounding whitespace from every text field and applies the
//! required/length checks implied by the column definitions. Checks that need
//! the database (foreign keys, uniqueness) happen in the service layer.

use crate::form_errors::FormErrors;
use serde::Deserialize;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Column limits, in characters
pub mod limits {
    pub const PERSON_NAME: usize = 45;
    pub const NICKNAME: usize = 45;
    pub const COURSE_NUMBER: usize = 20;
    pub const COURSE_NAME: usize = 225;
    pub const SECTION_NAME: usize = 10;
}

/// Trims `value` and records an error on `field` if it is empty or too long
fn clean_text(
    errors: &mut FormErrors,
    field: &str,
    value: String,
    max_len: usize,
    required: bool,
) -> String {
    let value = value.trim().to_owned();

    if value.is_empty() {
        if required {
            errors.add(field, REQUIRED);
        }
        return value;
    }

    let len = value.chars().count();
    if len > max_len {
        errors.add(
            field,
            format!("Ensure this value has at most {max_len} characters (it has {len})."),
        );
    }

    value
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct YearForm {
    pub year: i32,
}

impl YearForm {
    pub fn clean(self) -> Result<Self, FormErrors> {
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InstructorForm {
    pub first_name: String,
    pub last_name: String,
}

impl InstructorForm {
    pub fn clean(self) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();
        let cleaned = Self {
            first_name: clean_text(
                &mut errors,
                "first_name",
                self.first_name,
                limits::PERSON_NAME,
                true,
            ),
            last_name: clean_text(
                &mut errors,
                "last_name",
                self.last_name,
                limits::PERSON_NAME,
                true,
            ),
        };
        errors.into_result(cleaned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub nickname: String,
}

impl StudentForm {
    pub fn clean(self) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();
        let cleaned = Self {
            first_name: clean_text(
                &mut errors,
                "first_name",
                self.first_name,
                limits::PERSON_NAME,
                true,
            ),
            last_name: clean_text(
                &mut errors,
                "last_name",
                self.last_name,
                limits::PERSON_NAME,
                true,
            ),
            nickname: clean_text(
                &mut errors,
                "nickname",
                self.nickname,
                limits::NICKNAME,
                false,
            ),
        };
        errors.into_result(cleaned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseForm {
    pub course_number: String,
    pub course_name: String,
}

impl CourseForm {
    pub fn clean(self) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();
        let cleaned = Self {
            course_number: clean_text(
                &mut errors,
                "course_number",
                self.course_number,
                limits::COURSE_NUMBER,
                true,
            ),
            course_name: clean_text(
                &mut errors,
                "course_name",
                self.course_name,
                limits::COURSE_NAME,
                true,
            ),
        };
        errors.into_result(cleaned)
    }
}

/// A semester only references a year and a period, so there is nothing to trim
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SemesterForm {
    pub year_id: i32,
    pub period_id: i32,
}

impl SemesterForm {
    pub fn clean(self) -> Result<Self, FormErrors> {
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionForm {
    pub section_name: String,
    pub semester_id: i32,
    pub course_id: i32,
    pub instructor_id: i32,
}

impl SectionForm {
    pub fn clean(self) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();
        let section_name = clean_text(
            &mut errors,
            "section_name",
            self.section_name,
            limits::SECTION_NAME,
            true,
        );
        errors.into_result(Self {
            section_name,
            ..self
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrationForm {
    pub student_id: i32,
    pub section_id: i32,
}

impl RegistrationForm {
    pub fn clean(self) -> Result<Self, FormErrors> {
        Ok(self)
    }
}
