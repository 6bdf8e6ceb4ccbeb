use async_trait::async_trait;

use super::domain::{Admission, BookingWithRoom, Enrollment, RoomWithBookings, Ticket};
use super::errors::BookingError;

/// Repository abstraction for booking-related persistence.
///
/// The two `*_if_vacant` writes are capacity-guarded: the occupancy check and the write
/// happen atomically, so concurrent callers can never push a room past its capacity.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_booking_by_user(&self, user_id: i32) -> Result<Option<BookingWithRoom>, BookingError>;
    async fn find_room(&self, room_id: i32) -> Result<Option<RoomWithBookings>, BookingError>;
    async fn find_enrollment_by_user(&self, user_id: i32) -> Result<Option<Enrollment>, BookingError>;
    async fn find_ticket_by_enrollment(&self, enrollment_id: i32) -> Result<Option<Ticket>, BookingError>;

    async fn create_booking_if_vacant(&self, user_id: i32, room_id: i32) -> Result<Admission, BookingError>;
    async fn move_booking_if_vacant(&self, booking_id: i32, room_id: i32) -> Result<Admission, BookingError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use chrono::Utc;

    use crate::booking::domain::{Booking, Room, TicketStatus, TicketType};

    #[derive(Default)]
    struct State {
        rooms: BTreeMap<i32, Room>,
        bookings: BTreeMap<i32, Booking>,
        enrollments: Vec<Enrollment>,
        tickets: Vec<Ticket>,
        contended: HashSet<i32>,
        last_id: i32,
    }

    impl State {
        fn next_id(&mut self) -> i32 {
            self.last_id += 1;
            self.last_id
        }

        fn occupancy(&self, room_id: i32) -> usize {
            self.bookings.values().filter(|b| b.room_id == room_id).count()
        }

        fn vacant(&self, room: &Room) -> bool {
            !self.contended.contains(&room.id)
                && i64::try_from(self.occupancy(room.id)).unwrap_or(i64::MAX) < i64::from(room.capacity)
        }
    }

    #[derive(Default)]
    pub struct MockBookingRepository {
        state: Mutex<State>, // one lock, so every write is trivially atomic
    }

    impl MockBookingRepository {
        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        pub fn seed_room(&self, hotel_id: i32, name: &str, capacity: i32) -> Room {
            let mut st = self.state();
            let now = Utc::now().into();
            let room = Room { id: st.next_id(), name: name.to_string(), capacity, hotel_id, created_at: now, updated_at: now };
            st.rooms.insert(room.id, room.clone());
            room
        }

        pub fn seed_enrollment(&self, user_id: i32) -> Enrollment {
            let mut st = self.state();
            let enrollment = Enrollment { id: st.next_id(), user_id };
            st.enrollments.push(enrollment.clone());
            enrollment
        }

        pub fn seed_ticket(&self, enrollment_id: i32, status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
            let mut st = self.state();
            let ticket_type = TicketType { id: st.next_id(), name: "mock".into(), is_remote, includes_hotel };
            let ticket = Ticket { id: st.next_id(), enrollment_id, status, ticket_type };
            st.tickets.push(ticket.clone());
            ticket
        }

        /// Insert a booking without any capacity check.
        pub fn seed_booking(&self, user_id: i32, room_id: i32) -> Booking {
            let mut st = self.state();
            let now = Utc::now().into();
            let booking = Booking { id: st.next_id(), user_id, room_id, created_at: now, updated_at: now };
            st.bookings.insert(booking.id, booking.clone());
            booking
        }

        /// Make the next guarded writes to `room_id` behave as if a concurrent request took the last seat.
        pub fn contend_room(&self, room_id: i32) {
            self.state().contended.insert(room_id);
        }

        pub fn occupancy(&self, room_id: i32) -> usize {
            self.state().occupancy(room_id)
        }

        pub fn booking(&self, id: i32) -> Option<Booking> {
            self.state().bookings.get(&id).cloned()
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn find_booking_by_user(&self, user_id: i32) -> Result<Option<BookingWithRoom>, BookingError> {
            let st = self.state();
            let Some(booking) = st.bookings.values().find(|b| b.user_id == user_id) else {
                return Ok(None);
            };
            let room = st
                .rooms
                .get(&booking.room_id)
                .cloned()
                .ok_or_else(|| BookingError::Repository(format!("booking {} references missing room", booking.id)))?;
            Ok(Some(BookingWithRoom { id: booking.id, room }))
        }

        async fn find_room(&self, room_id: i32) -> Result<Option<RoomWithBookings>, BookingError> {
            let st = self.state();
            Ok(st.rooms.get(&room_id).cloned().map(|room| RoomWithBookings {
                bookings: st.bookings.values().filter(|b| b.room_id == room_id).cloned().collect(),
                room,
            }))
        }

        async fn find_enrollment_by_user(&self, user_id: i32) -> Result<Option<Enrollment>, BookingError> {
            Ok(self.state().enrollments.iter().find(|e| e.user_id == user_id).cloned())
        }

        async fn find_ticket_by_enrollment(&self, enrollment_id: i32) -> Result<Option<Ticket>, BookingError> {
            Ok(self.state().tickets.iter().find(|t| t.enrollment_id == enrollment_id).cloned())
        }

        async fn create_booking_if_vacant(&self, user_id: i32, room_id: i32) -> Result<Admission, BookingError> {
            let mut st = self.state();
            let room = st.rooms.get(&room_id).cloned().ok_or_else(|| BookingError::not_found("room"))?;
            if !st.vacant(&room) {
                return Ok(Admission::RoomFull);
            }
            let now = Utc::now().into();
            let booking = Booking { id: st.next_id(), user_id, room_id, created_at: now, updated_at: now };
            st.bookings.insert(booking.id, booking.clone());
            Ok(Admission::Admitted(booking))
        }

        async fn move_booking_if_vacant(&self, booking_id: i32, room_id: i32) -> Result<Admission, BookingError> {
            let mut st = self.state();
            let room = st.rooms.get(&room_id).cloned().ok_or_else(|| BookingError::not_found("room"))?;
            if !st.vacant(&room) {
                return Ok(Admission::RoomFull);
            }
            let booking = st.bookings.get_mut(&booking_id).ok_or_else(|| BookingError::not_found("booking"))?;
            booking.room_id = room_id;
            booking.updated_at = Utc::now().into();
            Ok(Admission::Admitted(booking.clone()))
        }
    }
}
