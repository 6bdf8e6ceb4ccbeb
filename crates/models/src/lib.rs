//! Data access layer: SeaORM entities and plain CRUD helpers for the booking domain.
//! Helpers take any `ConnectionTrait`, so they run equally on the pool or inside a transaction.

pub mod errors;
pub mod db;
pub mod user;
pub mod session;
pub mod hotel;
pub mod room;
pub mod enrollment;
pub mod ticket_type;
pub mod ticket;
pub mod booking;

#[cfg(test)]
mod tests;
