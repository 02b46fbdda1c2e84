use super::{
    common::{Labeled, RowRef},
    section::SectionResponse,
};
use database::{entities::course, services::views::SectionView};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub course_number: String,
    pub course_name: String,
    /// "Number - Name"
    pub label: String,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            label: course.label(),
            course_number: course.course_number,
            course_name: course.course_name,
        }
    }
}

impl Labeled for course::Model {
    fn row_ref(&self) -> RowRef {
        RowRef {
            id: self.id,
            label: self.label(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub course: CourseResponse,
    pub sections: Vec<SectionResponse>,
}

impl From<(course::Model, Vec<SectionView>)> for CourseDetailResponse {
    fn from((course, sections): (course::Model, Vec<SectionView>)) -> Self {
        Self {
            course: course.into(),
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }
}
