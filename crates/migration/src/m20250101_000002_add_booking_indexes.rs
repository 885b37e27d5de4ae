use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One booking per (municipality, time_slot); the store relies on this to reject racing writes
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_slot_unique")
                    .table(Booking::Table)
                    .col(Booking::Municipality)
                    .col(Booking::TimeSlot)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_booking_slot_unique").table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Booking { Table, Municipality, TimeSlot }
