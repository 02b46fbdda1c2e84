use super::{
    common::{Labeled, RowRef},
    registration::RegistrationResponse,
};
use database::{
    entities::student,
    services::{PageOf, views::RegistrationView},
};
use models::pagination::{Page, PageLinks};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Empty when the student has no nickname
    pub nickname: String,
    pub label: String,
}

impl From<student::Model> for StudentResponse {
    fn from(student: student::Model) -> Self {
        Self {
            id: student.id,
            label: student.label(),
            first_name: student.first_name,
            last_name: student.last_name,
            nickname: student.nickname,
        }
    }
}

impl Labeled for student::Model {
    fn row_ref(&self) -> RowRef {
        RowRef {
            id: self.id,
            label: self.label(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentPageResponse {
    pub students: Vec<StudentResponse>,
    pub page: Page,
    pub links: PageLinks,
}

impl From<PageOf<student::Model>> for StudentPageResponse {
    fn from(page: PageOf<student::Model>) -> Self {
        Self {
            students: page.items.into_iter().map(Into::into).collect(),
            links: page.page.links(),
            page: page.page,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetailResponse {
    pub student: StudentResponse,
    pub registrations: Vec<RegistrationResponse>,
}

impl From<(student::Model, Vec<RegistrationView>)> for StudentDetailResponse {
    fn from((student, registrations): (student::Model, Vec<RegistrationView>)) -> Self {
        Self {
            student: student.into(),
            registrations: registrations.into_iter().map(Into::into).collect(),
        }
    }
}
