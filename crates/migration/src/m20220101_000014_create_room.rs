//! Create `room` table with FK to `hotel`.
//!
//! `capacity` is fixed per room; occupancy is counted from `booking`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Room::Table)
                    .if_not_exists()
                    .col(pk_auto(Room::Id))
                    .col(integer(Room::HotelId).not_null())
                    .col(string_len(Room::Name, 255).not_null())
                    .col(integer(Room::Capacity).not_null())
                    .col(timestamp_with_time_zone(Room::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Room::UpdatedAt).not_null())
                    .check(Expr::col(Room::Capacity).gte(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_hotel")
                            .from(Room::Table, Room::HotelId)
                            .to(Hotel::Table, Hotel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Room::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Room { Table, Id, HotelId, Name, Capacity, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Hotel { Table, Id }
