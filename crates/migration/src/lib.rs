//! Migrator for the booking schema.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_booking;
mod m20250101_000002_add_booking_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_booking::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000002_add_booking_indexes::Migration),
        ]
    }
}
