//! Booking module: rule engine over a repository seam (domain, repository, service).
//!
//! Eligibility comes from the user's enrollment and ticket; capacity is fixed per room and
//! occupancy is always counted from the bookings that reference it.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use errors::BookingError;
pub use service::BookingService;
