use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketType::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketType::Id))
                    .col(string_len(TicketType::Name, 255).not_null())
                    .col(integer(TicketType::Price).not_null())
                    .col(boolean(TicketType::IsRemote).not_null())
                    .col(boolean(TicketType::IncludesHotel).not_null())
                    .col(timestamp_with_time_zone(TicketType::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(TicketType::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TicketType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TicketType { Table, Id, Name, Price, IsRemote, IncludesHotel, CreatedAt, UpdatedAt }
