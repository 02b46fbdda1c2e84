use super::{
    common::{Labeled, RowRef},
    section::SectionResponse,
    student::StudentResponse,
};
use database::services::views::RegistrationView;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub id: i32,
    pub student: RowRef,
    pub section: RowRef,
    /// "Section / Student"
    pub label: String,
}

impl From<RegistrationView> for RegistrationResponse {
    fn from(view: RegistrationView) -> Self {
        Self {
            id: view.registration.id,
            label: view.label(),
            student: view.student.row_ref(),
            section: view.section.row_ref(),
        }
    }
}

impl Labeled for RegistrationView {
    fn row_ref(&self) -> RowRef {
        RowRef {
            id: self.registration.id,
            label: self.label(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationDetailResponse {
    pub registration: RegistrationResponse,
    pub student: StudentResponse,
    pub section: SectionResponse,
}

impl From<RegistrationView> for RegistrationDetailResponse {
    fn from(view: RegistrationView) -> Self {
        Self {
            student: view.student.clone().into(),
            section: view.section.clone().into(),
            registration: view.into(),
        }
    }
}
