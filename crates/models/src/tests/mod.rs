/// CRUD helpers for every entity
pub mod crud_tests;

/// Row locking and rollback behaviour the booking writes depend on
pub mod transaction_tests;

use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use migration::MigratorTrait;
use uuid::Uuid;

use crate::db::connect;
use crate::{hotel, room, user};

// Migrations run once per test process; `false` means no database is reachable.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Connection for a DB-backed test, or `None` when the test should be skipped.
pub(crate) async fn test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let ready = *MIGRATED
        .get_or_init(|| async {
            let db = match connect().await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    return false;
                }
            };
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {}", e);
                    false
                }
            }
        })
        .await;
    if !ready {
        return None;
    }
    connect().await.ok()
}

pub(crate) async fn seed_user(db: &DatabaseConnection) -> anyhow::Result<user::Model> {
    Ok(user::create(db, &format!("guest_{}@example.com", Uuid::new_v4())).await?)
}

pub(crate) async fn seed_room(db: &DatabaseConnection, capacity: i32) -> anyhow::Result<room::Model> {
    let h = hotel::create(db, &format!("hotel_{}", Uuid::new_v4()), "https://img.example.com/h.png").await?;
    Ok(room::create(db, h.id, "101", capacity).await?)
}
