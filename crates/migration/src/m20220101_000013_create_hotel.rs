use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hotel::Table)
                    .if_not_exists()
                    .col(pk_auto(Hotel::Id))
                    .col(string_len(Hotel::Name, 255).not_null())
                    .col(string_len(Hotel::Image, 1024).not_null())
                    .col(timestamp_with_time_zone(Hotel::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Hotel::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Hotel::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Hotel { Table, Id, Name, Image, CreatedAt, UpdatedAt }
