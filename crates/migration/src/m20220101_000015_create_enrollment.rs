//! Create `enrollment` table; at most one per user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollment::Table)
                    .if_not_exists()
                    .col(pk_auto(Enrollment::Id))
                    .col(integer(Enrollment::UserId).unique_key().not_null())
                    .col(string_len(Enrollment::Name, 255).not_null())
                    .col(timestamp_with_time_zone(Enrollment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Enrollment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_user")
                            .from(Enrollment::Table, Enrollment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Enrollment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Enrollment { Table, Id, UserId, Name, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
