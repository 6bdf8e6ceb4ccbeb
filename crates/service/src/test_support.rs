#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect;
use models::ticket::TicketStatus;
use uuid::Uuid;

// Migrations run once per test process; `false` means no database is reachable.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Fresh connection for the current test's runtime, or `None` when DB tests should be skipped.
pub async fn get_db() -> Option<DatabaseConnection> {
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

pub async fn seed_user(db: &DatabaseConnection) -> anyhow::Result<models::user::Model> {
    Ok(models::user::create(db, &format!("guest_{}@example.com", Uuid::new_v4())).await?)
}

pub async fn seed_room(db: &DatabaseConnection, capacity: i32) -> anyhow::Result<models::room::Model> {
    let h = models::hotel::create(db, &format!("hotel_{}", Uuid::new_v4()), "https://img.example.com/h.png").await?;
    Ok(models::room::create(db, h.id, "101", capacity).await?)
}

/// User with an enrollment and a ticket of the given shape.
pub async fn seed_guest(
    db: &DatabaseConnection,
    status: TicketStatus,
    is_remote: bool,
    includes_hotel: bool,
) -> anyhow::Result<models::user::Model> {
    let user = seed_user(db).await?;
    let enrollment = models::enrollment::create(db, user.id, "Guest").await?;
    let kind = models::ticket_type::create(db, "Presencial + Hotel", 600, is_remote, includes_hotel).await?;
    models::ticket::create(db, enrollment.id, kind.id, status).await?;
    Ok(user)
}
