//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000011_create_user;
mod m20220101_000012_create_session;
mod m20220101_000013_create_hotel;
mod m20220101_000014_create_room;
mod m20220101_000015_create_enrollment;
mod m20220101_000016_create_ticket_type;
mod m20220101_000017_create_ticket;
mod m20220101_000018_create_booking;
mod m20220101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000011_create_user::Migration),
            Box::new(m20220101_000012_create_session::Migration),
            Box::new(m20220101_000013_create_hotel::Migration),
            Box::new(m20220101_000014_create_room::Migration),
            Box::new(m20220101_000015_create_enrollment::Migration),
            Box::new(m20220101_000016_create_ticket_type::Migration),
            Box::new(m20220101_000017_create_ticket::Migration),
            Box::new(m20220101_000018_create_booking::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000002_add_indexes::Migration),
        ]
    }
}
