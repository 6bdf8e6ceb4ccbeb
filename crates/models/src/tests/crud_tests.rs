use anyhow::Result;

use super::{seed_room, seed_user, test_db};
use crate::errors::ModelError;
use crate::ticket::TicketStatus;
use crate::{booking, enrollment, room, session, ticket, ticket_type, user};

#[tokio::test]
async fn test_user_rejects_invalid_email() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let err = user::create(&db, "not-an-email").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_session_lookup_by_token() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let u = seed_user(&db).await?;
    let token = format!("token-{}", u.id);
    let created = session::create(&db, u.id, &token).await?;

    let found = session::find_by_token(&db, &token).await?.expect("session");
    assert_eq!(found.id, created.id);
    assert_eq!(found.user_id, u.id);
    assert!(session::find_by_token(&db, "no-such-token").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ticket_joined_with_type() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let u = seed_user(&db).await?;
    let e = enrollment::create(&db, u.id, "Guest").await?;
    assert!(ticket::find_by_enrollment(&db, e.id).await?.is_none());

    let kind = ticket_type::create(&db, "In person + hotel", 600, false, true).await?;
    let t = ticket::create(&db, e.id, kind.id, TicketStatus::Paid).await?;

    let (found, found_kind) = ticket::find_by_enrollment(&db, e.id).await?.expect("ticket");
    assert_eq!(found.id, t.id);
    assert_eq!(found.status, TicketStatus::Paid);
    assert!(found_kind.includes_hotel);
    assert!(!found_kind.is_remote);

    let by_user = enrollment::find_by_user(&db, u.id).await?.expect("enrollment");
    assert_eq!(by_user.id, e.id);
    Ok(())
}

#[tokio::test]
async fn test_booking_lifecycle() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let u = seed_user(&db).await?;
    let first = seed_room(&db, 2).await?;
    let second = seed_room(&db, 2).await?;

    assert!(booking::find_first_by_user(&db, u.id).await?.is_none());

    let b = booking::create(&db, u.id, first.id).await?;
    assert_eq!(booking::count_by_room(&db, first.id).await?, 1);

    let (found, found_room) = booking::find_first_by_user(&db, u.id).await?.expect("booking");
    assert_eq!(found.id, b.id);
    assert_eq!(found_room.id, first.id);

    let moved = booking::update_room(&db, b.id, second.id).await?;
    assert_eq!(moved.id, b.id);
    assert_eq!(moved.user_id, u.id);
    assert_eq!(moved.room_id, second.id);
    assert_eq!(booking::count_by_room(&db, first.id).await?, 0);
    assert_eq!(booking::find_by_room(&db, second.id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_first_booking_wins_for_duplicates() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let u = seed_user(&db).await?;
    let r = seed_room(&db, 3).await?;
    let older = booking::create(&db, u.id, r.id).await?;
    let _newer = booking::create(&db, u.id, r.id).await?;

    let (found, _) = booking::find_first_by_user(&db, u.id).await?.expect("booking");
    assert_eq!(found.id, older.id);
    Ok(())
}

#[tokio::test]
async fn test_update_missing_booking_is_not_found() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let r = seed_room(&db, 1).await?;
    let err = booking::update_room(&db, i32::MAX, r.id).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn test_decrement_capacity() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let r = seed_room(&db, 3).await?;

    let lowered = room::decrement_capacity(&db, r.id, 1).await?;
    assert_eq!(lowered.capacity, 1);

    let raise = room::decrement_capacity(&db, r.id, 5).await.unwrap_err();
    assert!(matches!(raise, ModelError::Validation(_)));
    let negative = room::decrement_capacity(&db, r.id, -1).await.unwrap_err();
    assert!(matches!(negative, ModelError::Validation(_)));
    let missing = room::decrement_capacity(&db, i32::MAX, 0).await.unwrap_err();
    assert!(matches!(missing, ModelError::NotFound(_)));

    let stored = room::find_by_id(&db, r.id).await?.expect("room");
    assert_eq!(stored.capacity, 1);
    Ok(())
}
