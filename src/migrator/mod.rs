use sea_orm_migration::prelude::*;

mod m20260715_000001_create_plants_table;
mod m20260715_000002_create_telemetry_tables;
mod m20260716_000001_create_alerts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_000001_create_plants_table::Migration),
            Box::new(m20260715_000002_create_telemetry_tables::Migration),
            Box::new(m20260716_000001_create_alerts_table::Migration),
        ]
    }
}
