use database::entities::{period, year};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct YearResponse {
    pub id: i32,
    pub year: i32,
}

impl From<year::Model> for YearResponse {
    fn from(year: year::Model) -> Self {
        Self {
            id: year.id,
            year: year.year,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodResponse {
    pub id: i32,
    pub period_sequence: i32,
    pub period_name: String,
}

impl From<period::Model> for PeriodResponse {
    fn from(period: period::Model) -> Self {
        Self {
            id: period.id,
            period_sequence: period.period_sequence,
            period_name: period.period_name,
        }
    }
}
