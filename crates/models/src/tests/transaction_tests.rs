use anyhow::Result;
use sea_orm::TransactionTrait;

use super::{seed_room, seed_user, test_db};
use crate::{booking, room};

/// Booking inserted in a rolled-back transaction leaves no trace
#[tokio::test]
async fn test_booking_rollback() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let u = seed_user(&db).await?;
    let r = seed_room(&db, 1).await?;

    let txn = db.begin().await?;
    let locked = room::lock_by_id(&txn, r.id).await?.expect("room");
    assert_eq!(locked.id, r.id);
    booking::create(&txn, u.id, r.id).await?;
    assert_eq!(booking::count_by_room(&txn, r.id).await?, 1);
    txn.rollback().await?;

    assert_eq!(booking::count_by_room(&db, r.id).await?, 0);
    Ok(())
}

/// Booking inserted under the room lock is visible after commit
#[tokio::test]
async fn test_booking_commit_under_lock() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let u = seed_user(&db).await?;
    let r = seed_room(&db, 1).await?;

    let txn = db.begin().await?;
    room::lock_by_id(&txn, r.id).await?.expect("room");
    let b = booking::create(&txn, u.id, r.id).await?;
    txn.commit().await?;

    let rows = booking::find_by_room(&db, r.id).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, b.id);
    Ok(())
}

#[tokio::test]
async fn test_lock_missing_room_is_none() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let txn = db.begin().await?;
    assert!(room::lock_by_id(&txn, i32::MAX).await?.is_none());
    txn.rollback().await?;
    Ok(())
}
