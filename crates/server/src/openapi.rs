use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

/// Liveness body served by `/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
}

/// Booking as returned by the API. Timestamps are naive local `YYYY-MM-DDTHH:MM:SS`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookingDoc {
    pub token: String,
    pub municipality: String,
    pub address: String,
    #[schema(example = "2030-05-14T10:00:00")]
    pub time_slot: String,
    pub item_description: String,
    #[schema(example = "RECEIVED")]
    pub status: String,
    pub created_at: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewBookingDoc {
    #[schema(example = "Estremoz")]
    pub municipality: String,
    pub address: String,
    #[schema(example = "2030-05-14T10:00:00")]
    pub time_slot: String,
    pub item_description: String,
}

/// Full record; only municipality, address, timeSlot and status are applied.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookingUpdateDoc {
    pub municipality: String,
    pub address: String,
    pub time_slot: String,
    /// One of RECEIVED, ASSIGNED, IN_PROGRESS, COMPLETED, CANCELLED
    pub status: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::bookings::create,
        crate::routes::bookings::get,
        crate::routes::bookings::list,
        crate::routes::bookings::list_by_municipality,
        crate::routes::bookings::update,
        crate::routes::bookings::delete,
        crate::routes::municipalities::list,
    ),
    components(
        schemas(
            HealthResponse,
            BookingDoc,
            NewBookingDoc,
            BookingUpdateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "bookings"),
        (name = "municipalities")
    )
)]
pub struct ApiDoc;
