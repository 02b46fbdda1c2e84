use super::ensure_no_duplicates;
use crate::{
    entities::{period, year},
    error::ServiceError,
};
use log::info;
use models::forms::YearForm;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

const DUPLICATE_YEAR: &str = "Year with this Year already exists.";

/// Years and periods, the building blocks of semesters
pub struct ReferenceService;

impl ReferenceService {
    pub async fn list_years(db: &DatabaseConnection) -> Result<Vec<year::Model>, ServiceError> {
        Ok(year::Entity::find()
            .order_by_asc(year::Column::Year)
            .all(db)
            .await?)
    }

    pub async fn create_year(
        db: &DatabaseConnection,
        form: YearForm,
    ) -> Result<year::Model, ServiceError> {
        let form = form.clean()?;
        let txn = db.begin().await?;

        let duplicates = year::Entity::find()
            .filter(year::Column::Year.eq(form.year))
            .count(&txn)
            .await?;
        ensure_no_duplicates(duplicates, DUPLICATE_YEAR)?;

        let year = year::ActiveModel {
            year: Set(form.year),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_write(e, DUPLICATE_YEAR))?;

        txn.commit().await?;
        info!("Created year {} ({})", year.id, year.label());
        Ok(year)
    }

    /// Periods in their order within the academic year
    pub async fn list_periods(db: &DatabaseConnection) -> Result<Vec<period::Model>, ServiceError> {
        Ok(period::Entity::find()
            .order_by_asc(period::Column::PeriodSequence)
            .all(db)
            .await?)
    }
}
