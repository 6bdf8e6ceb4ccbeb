//! Service layer holding the booking rules and session resolution on top of models.
//! - Separates business logic from data access behind repository traits.
//! - Ships SeaORM-backed repositories plus in-memory mocks for tests and doc examples.

pub mod auth;
pub mod booking;
#[cfg(test)]
pub mod test_support;
