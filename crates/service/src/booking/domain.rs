use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub type Timestamp = DateTime<FixedOffset>;

/// A user's claim on one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// What `GET /booking` returns: the booking id and the room it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWithRoom {
    pub id: i32,
    #[serde(rename = "Room")]
    pub room: Room,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomWithBookings {
    pub room: Room,
    pub bookings: Vec<Booking>,
}

impl RoomWithBookings {
    pub fn occupancy(&self) -> usize { self.bookings.len() }

    pub fn is_full(&self) -> bool {
        i64::try_from(self.occupancy()).unwrap_or(i64::MAX) >= i64::from(self.room.capacity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Reserved,
    Paid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketType {
    pub id: i32,
    pub name: String,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub enrollment_id: i32,
    pub status: TicketStatus,
    pub ticket_type: TicketType,
}

impl Ticket {
    /// Hotel rooms need an in-person ticket with hotel included that is no longer just reserved.
    pub fn grants_hotel(&self) -> bool {
        self.ticket_type.includes_hotel
            && !self.ticket_type.is_remote
            && self.status != TicketStatus::Reserved
    }
}

/// Outcome of a capacity-guarded write.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Admitted(Booking),
    RoomFull,
}

/// Booking ids arrive as raw path text; only positive integers name a booking.
pub fn parse_booking_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}
