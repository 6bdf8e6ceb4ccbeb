use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::debug;

use crate::booking::domain::{Admission, Booking, BookingWithRoom, Enrollment, Room, RoomWithBookings, Ticket, TicketStatus, TicketType};
use crate::booking::errors::BookingError;
use crate::booking::repository::BookingRepository;

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn begin(&self) -> Result<DatabaseTransaction, BookingError> {
        self.db.begin().await.map_err(|e| BookingError::Repository(e.to_string()))
    }

    /// Lock the room row and report whether one more booking fits.
    async fn lock_vacant(txn: &DatabaseTransaction, room_id: i32) -> Result<bool, BookingError> {
        let room = models::room::lock_by_id(txn, room_id)
            .await?
            .ok_or_else(|| BookingError::not_found("room"))?;
        let taken = models::booking::count_by_room(txn, room_id).await?;
        let vacant = taken < u64::try_from(room.capacity).unwrap_or(0);
        debug!(room_id, taken, capacity = room.capacity, vacant, "room locked");
        Ok(vacant)
    }
}

async fn commit(txn: DatabaseTransaction) -> Result<(), BookingError> {
    txn.commit().await.map_err(|e| BookingError::Repository(e.to_string()))
}

impl From<models::booking::Model> for Booking {
    fn from(b: models::booking::Model) -> Self {
        Booking { id: b.id, user_id: b.user_id, room_id: b.room_id, created_at: b.created_at, updated_at: b.updated_at }
    }
}

impl From<models::room::Model> for Room {
    fn from(r: models::room::Model) -> Self {
        Room { id: r.id, name: r.name, capacity: r.capacity, hotel_id: r.hotel_id, created_at: r.created_at, updated_at: r.updated_at }
    }
}

impl From<models::ticket::TicketStatus> for TicketStatus {
    fn from(s: models::ticket::TicketStatus) -> Self {
        match s {
            models::ticket::TicketStatus::Reserved => TicketStatus::Reserved,
            models::ticket::TicketStatus::Paid => TicketStatus::Paid,
        }
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_booking_by_user(&self, user_id: i32) -> Result<Option<BookingWithRoom>, BookingError> {
        let found = models::booking::find_first_by_user(&self.db, user_id).await?;
        Ok(found.map(|(b, r)| BookingWithRoom { id: b.id, room: r.into() }))
    }

    async fn find_room(&self, room_id: i32) -> Result<Option<RoomWithBookings>, BookingError> {
        let Some(room) = models::room::find_by_id(&self.db, room_id).await? else {
            return Ok(None);
        };
        let bookings = models::booking::find_by_room(&self.db, room_id).await?;
        Ok(Some(RoomWithBookings { room: room.into(), bookings: bookings.into_iter().map(Booking::from).collect() }))
    }

    async fn find_enrollment_by_user(&self, user_id: i32) -> Result<Option<Enrollment>, BookingError> {
        let found = models::enrollment::find_by_user(&self.db, user_id).await?;
        Ok(found.map(|e| Enrollment { id: e.id, user_id: e.user_id }))
    }

    async fn find_ticket_by_enrollment(&self, enrollment_id: i32) -> Result<Option<Ticket>, BookingError> {
        let found = models::ticket::find_by_enrollment(&self.db, enrollment_id).await?;
        Ok(found.map(|(t, kind)| Ticket {
            id: t.id,
            enrollment_id: t.enrollment_id,
            status: t.status.into(),
            ticket_type: TicketType { id: kind.id, name: kind.name, is_remote: kind.is_remote, includes_hotel: kind.includes_hotel },
        }))
    }

    async fn create_booking_if_vacant(&self, user_id: i32, room_id: i32) -> Result<Admission, BookingError> {
        let txn = self.begin().await?;
        if !Self::lock_vacant(&txn, room_id).await? {
            // dropping the transaction rolls it back and releases the row lock
            return Ok(Admission::RoomFull);
        }
        let created = models::booking::create(&txn, user_id, room_id).await?;
        commit(txn).await?;
        Ok(Admission::Admitted(created.into()))
    }

    async fn move_booking_if_vacant(&self, booking_id: i32, room_id: i32) -> Result<Admission, BookingError> {
        let txn = self.begin().await?;
        if !Self::lock_vacant(&txn, room_id).await? {
            return Ok(Admission::RoomFull);
        }
        let moved = models::booking::update_room(&txn, booking_id, room_id).await?;
        commit(txn).await?;
        Ok(Admission::Admitted(moved.into()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{get_db, seed_guest, seed_room, seed_user};
    use models::ticket::TicketStatus as DbTicketStatus;

    #[tokio::test]
    async fn reads_map_rows_into_domain() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let guest = seed_guest(&db, DbTicketStatus::Paid, false, true).await?;
        let room = seed_room(&db, 2).await?;
        let booking = models::booking::create(&db, guest.id, room.id).await?;
        let repo = SeaOrmBookingRepository::new(db);

        let found = repo.find_booking_by_user(guest.id).await?.expect("booking");
        assert_eq!(found.id, booking.id);
        assert_eq!(found.room.capacity, 2);

        let with = repo.find_room(room.id).await?.expect("room");
        assert_eq!(with.occupancy(), 1);
        assert!(!with.is_full());

        let enrollment = repo.find_enrollment_by_user(guest.id).await?.expect("enrollment");
        let ticket = repo.find_ticket_by_enrollment(enrollment.id).await?.expect("ticket");
        assert_eq!(ticket.status, TicketStatus::Paid);
        assert!(ticket.grants_hotel());

        assert!(repo.find_room(-1).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn guarded_create_stops_at_capacity() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let a = seed_user(&db).await?;
        let b = seed_user(&db).await?;
        let room = seed_room(&db, 1).await?;
        let repo = SeaOrmBookingRepository::new(db.clone());

        assert!(matches!(repo.create_booking_if_vacant(a.id, room.id).await?, Admission::Admitted(_)));
        assert_eq!(repo.create_booking_if_vacant(b.id, room.id).await?, Admission::RoomFull);
        assert_eq!(models::booking::count_by_room(&db, room.id).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn guarded_move_keeps_booking_identity() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let user = seed_user(&db).await?;
        let from = seed_room(&db, 1).await?;
        let to = seed_room(&db, 1).await?;
        let booking = models::booking::create(&db, user.id, from.id).await?;
        let repo = SeaOrmBookingRepository::new(db.clone());

        let Admission::Admitted(moved) = repo.move_booking_if_vacant(booking.id, to.id).await? else {
            panic!("move should be admitted");
        };
        assert_eq!(moved.id, booking.id);
        assert_eq!(moved.user_id, user.id);
        assert_eq!(moved.room_id, to.id);
        assert_eq!(models::booking::count_by_room(&db, from.id).await?, 0);

        // the target is now full, a second mover is turned away
        let other = seed_user(&db).await?;
        let second = models::booking::create(&db, other.id, from.id).await?;
        assert_eq!(repo.move_booking_if_vacant(second.id, to.id).await?, Admission::RoomFull);
        Ok(())
    }

    #[tokio::test]
    async fn guarded_write_to_missing_room_is_not_found() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let user = seed_user(&db).await?;
        let room = seed_room(&db, 2).await?;
        let booking = models::booking::create(&db, user.id, room.id).await?;
        let repo = SeaOrmBookingRepository::new(db.clone());

        let err = repo.create_booking_if_vacant(user.id, i32::MAX).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));

        let err = repo.move_booking_if_vacant(booking.id, i32::MAX).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
        // the booking stays where it was
        assert_eq!(models::booking::count_by_room(&db, room.id).await?, 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_never_overfill() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let room = seed_room(&db, 1).await?;
        let mut users = Vec::new();
        for _ in 0..8 {
            users.push(seed_user(&db).await?);
        }
        let repo = Arc::new(SeaOrmBookingRepository::new(db.clone()));
        let room_id = room.id;

        let mut handles = Vec::new();
        for user in users {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.create_booking_if_vacant(user.id, room_id).await }));
        }
        let mut admitted = 0;
        for h in handles {
            if let Admission::Admitted(_) = h.await?? {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(models::booking::count_by_room(&db, room.id).await?, 1);
        Ok(())
    }
}
