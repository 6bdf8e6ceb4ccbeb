use models::errors::ModelError;
use thiserror::Error;

/// Business errors for booking workflows
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl BookingError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn unauthorized(reason: impl Into<String>) -> Self { Self::Unauthorized(reason.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            BookingError::NotFound(_) => 2001,
            BookingError::Unauthorized(_) => 2002,
            BookingError::Validation(_) => 2003,
            BookingError::Repository(_) => 2100,
        }
    }
}

impl From<ModelError> for BookingError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => BookingError::Validation(msg),
            ModelError::NotFound(what) => BookingError::NotFound(format!("{} not found", what)),
            ModelError::Db(msg) => BookingError::Repository(msg),
        }
    }
}
