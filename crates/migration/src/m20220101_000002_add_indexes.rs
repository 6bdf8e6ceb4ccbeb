//! Lookup indexes for the booking queries: by user, by room, sessions by token.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_booking_user_id")
                    .table(Booking::Table)
                    .col(Booking::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_booking_room_id")
                    .table(Booking::Table)
                    .col(Booking::RoomId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_room_hotel_id")
                    .table(Room::Table)
                    .col(Room::HotelId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_session_token")
                    .table(Session::Table)
                    .col(Session::Token)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_session_token").table(Session::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_room_hotel_id").table(Room::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_room_id").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_user_id").table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Booking { Table, UserId, RoomId }

#[derive(DeriveIden)]
enum Room { Table, HotelId }

#[derive(DeriveIden)]
enum Session { Table, Token }
