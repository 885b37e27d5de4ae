//! Create `booking` table.
//!
//! One row per bulky-item pickup reservation, keyed by the token handed to the citizen.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(string_len(Booking::Token, 64).primary_key())
                    .col(string_len(Booking::Municipality, 128).not_null())
                    .col(string_len(Booking::Address, 512).not_null())
                    .col(timestamp(Booking::TimeSlot).not_null())
                    .col(text(Booking::ItemDescription).not_null())
                    .col(string_len(Booking::Status, 16).not_null())
                    .col(timestamp(Booking::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Token,
    Municipality,
    Address,
    TimeSlot,
    ItemDescription,
    Status,
    CreatedAt,
}
