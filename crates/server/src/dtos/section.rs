use super::{
    common::{Labeled, RowRef},
    course::CourseResponse,
    instructor::InstructorResponse,
    registration::RegistrationResponse,
    semester::SemesterResponse,
};
use database::services::views::{RegistrationView, SectionView};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionResponse {
    pub id: i32,
    pub section_name: String,
    pub semester: RowRef,
    pub course: RowRef,
    pub instructor: RowRef,
    /// "Course number - Section name (Semester)"
    pub label: String,
}

impl From<SectionView> for SectionResponse {
    fn from(view: SectionView) -> Self {
        Self {
            label: view.label(),
            semester: view.semester.row_ref(),
            course: view.course.row_ref(),
            instructor: view.instructor.row_ref(),
            id: view.section.id,
            section_name: view.section.section_name,
        }
    }
}

impl Labeled for SectionView {
    fn row_ref(&self) -> RowRef {
        RowRef {
            id: self.section.id,
            label: self.label(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionDetailResponse {
    pub section: SectionResponse,
    pub course: CourseResponse,
    pub semester: SemesterResponse,
    pub instructor: InstructorResponse,
    pub registrations: Vec<RegistrationResponse>,
}

impl From<(SectionView, Vec<RegistrationView>)> for SectionDetailResponse {
    fn from((view, registrations): (SectionView, Vec<RegistrationView>)) -> Self {
        Self {
            course: view.course.clone().into(),
            semester: view.semester.clone().into(),
            instructor: view.instructor.clone().into(),
            section: view.into(),
            registrations: registrations.into_iter().map(Into::into).collect(),
        }
    }
}
