use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::auth::AuthError;
use service::booking::BookingError;
use thiserror::Error;
use tracing::{error, warn};

// storage failures are logged, never echoed to the client
const UNPROCESSABLE: &str = "request could not be processed";

/// Non-2xx response rendered as `{ "error": <title>, "message": <detail|null> }`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        Self { status, body: ErrorBody::new(error, message) }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(message.into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<BookingError> for JsonApiError {
    fn from(e: BookingError) -> Self {
        let code = e.code();
        match e {
            BookingError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            BookingError::Unauthorized(msg) => JsonApiError::unauthorized(msg),
            BookingError::Validation(msg) => JsonApiError::bad_request(msg),
            BookingError::Repository(msg) => {
                error!(code, err = %msg, "booking repository failure");
                JsonApiError::bad_request(UNPROCESSABLE)
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let code = e.code();
        match e {
            AuthError::Unauthorized => JsonApiError::unauthorized(AuthError::Unauthorized.to_string()),
            AuthError::TokenError(msg) => {
                warn!(code, err = %msg, "token error");
                JsonApiError::unauthorized(msg)
            }
            AuthError::Repository(msg) => {
                error!(code, err = %msg, "session repository failure");
                JsonApiError::bad_request(UNPROCESSABLE)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_errors_map_to_documented_statuses() {
        assert_eq!(JsonApiError::from(BookingError::not_found("room")).status, StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(BookingError::unauthorized("full")).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(BookingError::Validation("x".into())).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(BookingError::Repository("x".into())).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_errors_map_to_unauthorized() {
        assert_eq!(JsonApiError::from(AuthError::Unauthorized).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::TokenError("bad".into())).status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn repository_failures_hide_driver_text() {
        let raw = "error returned from database: relation \"booking\" does not exist";
        for err in [
            JsonApiError::from(BookingError::Repository(raw.into())),
            JsonApiError::from(AuthError::Repository(raw.into())),
        ] {
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.body.message.as_deref(), Some("request could not be processed"));
        }
    }

    #[test]
    fn body_carries_title_and_detail() {
        let err = JsonApiError::from(BookingError::not_found("booking"));
        assert_eq!(err.body.error, "Not Found");
        assert_eq!(err.body.message.as_deref(), Some("booking not found"));
    }
}
