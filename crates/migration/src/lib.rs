pub use sea_orm_migration::prelude::*;

mod idens;
mod m20191028_000001_create_reference_tables;
mod m20191028_000002_create_registration_tables;
mod m20191028_000003_add_indexes;
mod m20191028_000004_seed_periods;

pub use m20191028_000004_seed_periods::PERIODS;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20191028_000001_create_reference_tables::Migration),
            Box::new(m20191028_000002_create_registration_tables::Migration),
            Box::new(m20191028_000003_add_indexes::Migration),
            Box::new(m20191028_000004_seed_periods::Migration),
        ]
    }
}
