use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse { pub error: String, pub message: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest { pub room_id: i32 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDoc {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct BookingDoc {
    pub id: i32,
    #[serde(rename = "Room")]
    pub room: RoomDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingDoc { pub booking_id: i32 }

#[derive(Serialize, ToSchema)]
pub struct UpdatedBookingDoc { pub booking: i32 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::booking::get_booking,
        crate::routes::booking::create_booking,
        crate::routes::booking::update_booking,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            BookingRequest,
            RoomDoc,
            BookingDoc,
            CreatedBookingDoc,
            UpdatedBookingDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "booking")
    )
)]
pub struct ApiDoc;
