use super::{
    common::{Labeled, RowRef},
    section::SectionResponse,
};
use database::{
    entities::instructor,
    services::{PageOf, views::SectionView},
};
use models::pagination::{Page, PageLinks};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// "Last, First"
    pub label: String,
}

impl From<instructor::Model> for InstructorResponse {
    fn from(instructor: instructor::Model) -> Self {
        Self {
            id: instructor.id,
            label: instructor.label(),
            first_name: instructor.first_name,
            last_name: instructor.last_name,
        }
    }
}

impl Labeled for instructor::Model {
    fn row_ref(&self) -> RowRef {
        RowRef {
            id: self.id,
            label: self.label(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorPageResponse {
    pub instructors: Vec<InstructorResponse>,
    pub page: Page,
    pub links: PageLinks,
}

impl From<PageOf<instructor::Model>> for InstructorPageResponse {
    fn from(page: PageOf<instructor::Model>) -> Self {
        Self {
            instructors: page.items.into_iter().map(Into::into).collect(),
            links: page.page.links(),
            page: page.page,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorDetailResponse {
    pub instructor: InstructorResponse,
    pub sections: Vec<SectionResponse>,
}

impl From<(instructor::Model, Vec<SectionView>)> for InstructorDetailResponse {
    fn from((instructor, sections): (instructor::Model, Vec<SectionView>)) -> Self {
        Self {
            instructor: instructor.into(),
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }
}
