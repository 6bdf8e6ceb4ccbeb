use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    response::Response,
};
use sea_orm::DatabaseConnection;

use service::auth::{
    repo::seaorm::SeaOrmSessionRepository,
    repository::SessionRepository,
    service::{AuthConfig, AuthService},
};
use service::booking::{repo::seaorm::SeaOrmBookingRepository, repository::BookingRepository, BookingService};

use crate::errors::JsonApiError;

/// Shared handler state. Services sit behind trait objects so the router runs over any repository.
#[derive(Clone)]
pub struct ServerState {
    pub bookings: Arc<BookingService<dyn BookingRepository>>,
    pub auth: Arc<AuthService<dyn SessionRepository>>,
}

impl ServerState {
    pub fn new(bookings: Arc<dyn BookingRepository>, sessions: Arc<dyn SessionRepository>, auth: AuthConfig) -> Self {
        Self {
            bookings: Arc::new(BookingService::new(bookings)),
            auth: Arc::new(AuthService::new(sessions, auth)),
        }
    }

    pub fn from_db(db: DatabaseConnection, auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(SeaOrmBookingRepository::new(db.clone())),
            Arc::new(SeaOrmSessionRepository::new(db)),
            auth,
        )
    }
}

/// Caller identity placed in request extensions by [`require_bearer_token`].
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

/// Resolve `Authorization: Bearer <token>` to a user, or answer 401 before any handler runs.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    // CORS preflight carries no credentials
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();

    let token = {
        let Some(header) = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
            tracing::debug!(path = %path, "missing Authorization header");
            return Err(JsonApiError::unauthorized("missing bearer token"));
        };
        match header.strip_prefix("Bearer ").map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized("malformed Authorization header"));
            }
        }
    };

    let identity = state.auth.authenticate(&token).await.map_err(|e| {
        tracing::warn!(path = %path, err = %e, "token validation failed");
        JsonApiError::from(e)
    })?;
    req.extensions_mut().insert(AuthenticatedUser { user_id: identity.user_id });
    Ok(next.run(req).await)
}
