use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use service::booking::domain::BookingWithRoom;

use crate::{errors::JsonApiError, routes::auth::{AuthenticatedUser, ServerState}};

/// Body of `POST /booking` and `PUT /booking/:bookingId`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    #[serde(default, deserialize_with = "lenient_room_id")]
    pub room_id: i32,
}

/// Anything that is not a whole number (or integer text) becomes 0, which no room carries.
fn lenient_room_id<'de, D: Deserializer<'de>>(de: D) -> Result<i32, D::Error> {
    let raw = Value::deserialize(de)?;
    Ok(match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX)).map(|f| f as i64))
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i32>().unwrap_or(0),
        _ => 0,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBooking {
    pub booking_id: i32,
}

#[derive(Debug, Serialize)]
pub struct UpdatedBooking {
    pub booking: i32,
}

fn body(payload: Result<Json<BookingInput>, JsonRejection>) -> Result<BookingInput, JsonApiError> {
    payload.map(|Json(input)| input).map_err(|e| {
        debug!(err = %e, "rejected booking body");
        JsonApiError::bad_request(e.body_text())
    })
}

#[utoipa::path(
    get, path = "/booking", tag = "booking",
    responses(
        (status = 200, description = "Current booking", body = crate::openapi::BookingDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse),
        (status = 404, description = "No booking", body = crate::openapi::ErrorResponse),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<BookingWithRoom>, JsonApiError> {
    let booking = state.bookings.get_booking(user.user_id).await?;
    Ok(Json(booking))
}

#[utoipa::path(
    post, path = "/booking", tag = "booking",
    request_body = crate::openapi::BookingRequest,
    responses(
        (status = 200, description = "Booked", body = crate::openapi::CreatedBookingDoc),
        (status = 401, description = "Ineligible ticket or room full", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Enrollment, ticket or room missing", body = crate::openapi::ErrorResponse),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<BookingInput>, JsonRejection>,
) -> Result<Json<CreatedBooking>, JsonApiError> {
    let input = body(payload)?;
    let booking_id = state.bookings.create_booking(user.user_id, input.room_id).await?;
    Ok(Json(CreatedBooking { booking_id }))
}

#[utoipa::path(
    put, path = "/booking/{bookingId}", tag = "booking",
    params(("bookingId" = String, Path, description = "Id of the caller's booking")),
    request_body = crate::openapi::BookingRequest,
    responses(
        (status = 200, description = "Moved", body = crate::openapi::UpdatedBookingDoc),
        (status = 401, description = "Room full or booking not owned", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Room missing", body = crate::openapi::ErrorResponse),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update_booking(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<String>,
    payload: Result<Json<BookingInput>, JsonRejection>,
) -> Result<Json<UpdatedBooking>, JsonApiError> {
    let input = body(payload)?;
    let booking = state.bookings.update_booking(user.user_id, input.room_id, &booking_id).await?;
    Ok(Json(UpdatedBooking { booking }))
}
