//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20251110_000001_create_brand;
mod m20251110_000002_create_person;
mod m20251110_000003_create_vehicle;
mod m20251110_000004_create_ownership;
mod m20251110_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251110_000001_create_brand::Migration),
            Box::new(m20251110_000002_create_person::Migration),
            Box::new(m20251110_000003_create_vehicle::Migration),
            Box::new(m20251110_000004_create_ownership::Migration),
            // Indexes should always be applied last
            Box::new(m20251110_000005_add_indexes::Migration),
        ]
    }
}
