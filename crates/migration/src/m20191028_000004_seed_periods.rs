use crate::idens::Periods;
use sea_orm_migration::{prelude::*, sea_orm::ConnectionTrait};

/// Fixed periods of the academic year as `(period_sequence, period_name)`
pub const PERIODS: [(i32, &str); 4] = [
    (9999, "TemporaryValue"),
    (10, "Spring"),
    (20, "Summer"),
    (30, "Fall"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        let mut insert = Query::insert();
        insert
            .into_table(Periods::Table)
            .columns([Periods::PeriodSequence, Periods::PeriodName]);
        for (sequence, name) in PERIODS {
            insert.values_panic([sequence.into(), name.into()]);
        }

        db.execute(backend.build(&insert)).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        // Only the seeded rows are removed
        let delete = Query::delete()
            .from_table(Periods::Table)
            .and_where(
                Expr::col(Periods::PeriodSequence)
                    .is_in(PERIODS.iter().map(|(sequence, _)| *sequence)),
            )
            .to_owned();

        db.execute(backend.build(&delete)).await?;

        Ok(())
    }
}
