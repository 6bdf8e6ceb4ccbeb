//! Create `ticket` table with FKs to `enrollment` and `ticket_type`.
//!
//! `status` holds `RESERVED` or `PAID`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(integer(Ticket::EnrollmentId).unique_key().not_null())
                    .col(integer(Ticket::TicketTypeId).not_null())
                    .col(string_len(Ticket::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Ticket::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Ticket::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_enrollment")
                            .from(Ticket::Table, Ticket::EnrollmentId)
                            .to(Enrollment::Table, Enrollment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_ticket_type")
                            .from(Ticket::Table, Ticket::TicketTypeId)
                            .to(TicketType::Table, TicketType::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Ticket::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ticket { Table, Id, EnrollmentId, TicketTypeId, Status, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Enrollment { Table, Id }

#[derive(DeriveIden)]
enum TicketType { Table, Id }
