use super::{
    common::{Labeled, RowRef},
    section::SectionResponse,
};
use database::services::views::{SectionView, SemesterView};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SemesterResponse {
    pub id: i32,
    pub year_id: i32,
    pub period_id: i32,
    pub year: i32,
    pub period_name: String,
    /// "Year - Period"
    pub label: String,
}

impl From<SemesterView> for SemesterResponse {
    fn from(view: SemesterView) -> Self {
        Self {
            label: view.label(),
            id: view.semester.id,
            year_id: view.semester.year_id,
            period_id: view.semester.period_id,
            year: view.year.year,
            period_name: view.period.period_name,
        }
    }
}

impl Labeled for SemesterView {
    fn row_ref(&self) -> RowRef {
        RowRef {
            id: self.semester.id,
            label: self.label(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SemesterDetailResponse {
    pub semester: SemesterResponse,
    pub sections: Vec<SectionResponse>,
}

impl From<(SemesterView, Vec<SectionView>)> for SemesterDetailResponse {
    fn from((semester, sections): (SemesterView, Vec<SectionView>)) -> Self {
        Self {
            semester: semester.into(),
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }
}
