use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{parse_booking_id, Admission, BookingWithRoom};
use super::errors::BookingError;
use super::repository::BookingRepository;

/// Booking business service independent of web framework
pub struct BookingService<R: BookingRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: BookingRepository + ?Sized> BookingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Current booking of the user together with its room.
    ///
    /// # Examples
    /// ```
    /// use service::booking::{service::BookingService, repository::mock::MockBookingRepository, BookingError};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockBookingRepository::default());
    /// let room = repo.seed_room(1, "101", 2);
    /// let booking = repo.seed_booking(7, room.id);
    /// let svc = BookingService::new(repo);
    /// let found = tokio_test::block_on(svc.get_booking(7)).unwrap();
    /// assert_eq!(found.id, booking.id);
    /// assert_eq!(found.room.id, room.id);
    /// let missing = tokio_test::block_on(svc.get_booking(8)).unwrap_err();
    /// assert!(matches!(missing, BookingError::NotFound(_)));
    /// ```
    #[instrument(skip(self))]
    pub async fn get_booking(&self, user_id: i32) -> Result<BookingWithRoom, BookingError> {
        self.repo
            .find_booking_by_user(user_id)
            .await?
            .ok_or_else(|| BookingError::not_found("booking"))
    }

    /// Book `room_id` for the user and return the new booking id.
    ///
    /// Checks run in a fixed order: enrollment, ticket, room id, ticket eligibility,
    /// room existence, occupancy. The final write re-checks occupancy atomically.
    #[instrument(skip(self))]
    pub async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<i32, BookingError> {
        let enrollment = self
            .repo
            .find_enrollment_by_user(user_id)
            .await?
            .ok_or_else(|| BookingError::not_found("enrollment"))?;
        let ticket = self
            .repo
            .find_ticket_by_enrollment(enrollment.id)
            .await?
            .ok_or_else(|| BookingError::not_found("ticket"))?;
        if room_id <= 0 {
            return Err(BookingError::not_found("room"));
        }
        if !ticket.grants_hotel() {
            debug!(ticket_id = ticket.id, status = ?ticket.status, "booking_rejected: ticket does not grant hotel");
            return Err(BookingError::unauthorized("ticket does not include hotel access"));
        }

        let room = self.repo.find_room(room_id).await?.ok_or_else(|| BookingError::not_found("room"))?;
        if room.is_full() {
            debug!(room_id, occupancy = room.occupancy(), capacity = room.room.capacity, "booking_rejected: room full");
            return Err(BookingError::unauthorized("room is full"));
        }

        match self.repo.create_booking_if_vacant(user_id, room_id).await? {
            Admission::Admitted(booking) => {
                info!(booking_id = booking.id, user_id, room_id, "booking_created");
                Ok(booking.id)
            }
            Admission::RoomFull => {
                debug!(room_id, "booking_rejected: room filled concurrently");
                Err(BookingError::unauthorized("room is full"))
            }
        }
    }

    /// Move the caller's booking `booking_id` to `room_id` and return its id.
    ///
    /// `booking_id` is the raw path segment; anything that is not a positive integer naming
    /// the caller's own booking is rejected as unauthorized.
    #[instrument(skip(self))]
    pub async fn update_booking(&self, user_id: i32, room_id: i32, booking_id: &str) -> Result<i32, BookingError> {
        if room_id <= 0 {
            return Err(BookingError::not_found("room"));
        }
        let room = self.repo.find_room(room_id).await?.ok_or_else(|| BookingError::not_found("room"))?;
        if room.is_full() {
            debug!(room_id, occupancy = room.occupancy(), capacity = room.room.capacity, "booking_rejected: room full");
            return Err(BookingError::unauthorized("room is full"));
        }

        let requested = parse_booking_id(booking_id)
            .ok_or_else(|| BookingError::unauthorized("booking id must be a positive integer"))?;
        let own = self
            .repo
            .find_booking_by_user(user_id)
            .await?
            .ok_or_else(|| BookingError::unauthorized("user has no booking"))?;
        if own.id != requested {
            debug!(user_id, requested, own = own.id, "booking_rejected: not the caller's booking");
            return Err(BookingError::unauthorized("booking does not belong to user"));
        }

        match self.repo.move_booking_if_vacant(own.id, room_id).await? {
            Admission::Admitted(booking) => {
                info!(booking_id = booking.id, user_id, from = own.room.id, to = room_id, "booking_moved");
                Ok(booking.id)
            }
            Admission::RoomFull => {
                debug!(room_id, "booking_rejected: room filled concurrently");
                Err(BookingError::unauthorized("room is full"))
            }
        }
    }
}
