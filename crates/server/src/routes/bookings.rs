use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::booking::{Booking, BookingUpdate, NewBooking};
use tracing::{info, warn};

use crate::{errors::{BookingApiError, JsonApiError}, metrics, routes::AppState};

/// Malformed or incomplete bodies are rejected like rule violations: 400 with a plain-text reason.
fn unreadable_body(operation: &'static str, rejection: JsonRejection) -> BookingApiError {
    metrics::record(operation, "invalid");
    warn!(operation, error = %rejection.body_text(), "booking_body_rejected");
    BookingApiError::BadRequest(rejection.body_text())
}

#[utoipa::path(
    post, path = "/api/bookings", tag = "bookings",
    request_body = crate::openapi::NewBookingDoc,
    responses(
        (status = 201, description = "Booked; body is the token", body = String, content_type = "text/plain"),
        (status = 400, description = "Slot already booked, less than one hour away, or unreadable body", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, String), BookingApiError> {
    let Json(input) = payload.map_err(|e| unreadable_body("create", e))?;
    info!(municipality = %input.municipality, time_slot = %input.time_slot, "booking_create_request");
    match state.bookings.request_booking(input).await {
        Ok(token) => {
            metrics::record("create", "ok");
            Ok((StatusCode::CREATED, token))
        }
        Err(e) => {
            metrics::record("create", metrics::outcome(&e));
            warn!(error = %e, code = e.code(), "booking_create_rejected");
            Err(BookingApiError::rejected(e))
        }
    }
}

#[utoipa::path(
    get, path = "/api/bookings/{token}", tag = "bookings",
    params(("token" = String, Path, description = "Booking token")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::BookingDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Booking>, BookingApiError> {
    match state.bookings.get_booking(&token).await {
        Ok(Some(booking)) => {
            metrics::record("get", "ok");
            Ok(Json(booking))
        }
        Ok(None) => {
            metrics::record("get", "not_found");
            info!(token = %token, "booking_not_found");
            Err(BookingApiError::NotFound)
        }
        Err(e) => {
            metrics::record("get", metrics::outcome(&e));
            Err(BookingApiError::lookup(e))
        }
    }
}

#[utoipa::path(
    get, path = "/api/bookings", tag = "bookings",
    responses(
        (status = 200, description = "All bookings", body = [crate::openapi::BookingDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, JsonApiError> {
    match state.bookings.list_bookings().await {
        Ok(list) => {
            info!(count = list.len(), "list bookings");
            metrics::record("list", "ok");
            Ok(Json(list))
        }
        Err(e) => {
            metrics::record("list", metrics::outcome(&e));
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/api/bookings/municipality/{municipality}", tag = "bookings",
    params(("municipality" = String, Path, description = "Exact, case-sensitive municipality name")),
    responses(
        (status = 200, description = "Bookings in the municipality", body = [crate::openapi::BookingDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list_by_municipality(
    State(state): State<AppState>,
    Path(municipality): Path<String>,
) -> Result<Json<Vec<Booking>>, JsonApiError> {
    match state.bookings.list_bookings_by_municipality(&municipality).await {
        Ok(list) => {
            info!(count = list.len(), municipality = %municipality, "list bookings by municipality");
            metrics::record("list_by_municipality", "ok");
            Ok(Json(list))
        }
        Err(e) => {
            metrics::record("list_by_municipality", metrics::outcome(&e));
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/api/bookings/{token}", tag = "bookings",
    params(("token" = String, Path, description = "Booking token")),
    request_body = crate::openapi::BookingUpdateDoc,
    responses(
        (status = 200, description = "Updated; body is the token", body = String, content_type = "text/plain"),
        (status = 400, description = "Unknown token, slot already booked, new slot less than one hour away, or unreadable body", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    payload: Result<Json<BookingUpdate>, JsonRejection>,
) -> Result<String, BookingApiError> {
    let Json(input) = payload.map_err(|e| unreadable_body("update", e))?;
    match state.bookings.update_booking(&token, input).await {
        Ok(token) => {
            metrics::record("update", "ok");
            Ok(token)
        }
        Err(e) => {
            metrics::record("update", metrics::outcome(&e));
            warn!(token = %token, error = %e, code = e.code(), "booking_update_rejected");
            Err(BookingApiError::rejected(e))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/bookings/{token}", tag = "bookings",
    params(("token" = String, Path, description = "Booking token")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, BookingApiError> {
    match state.bookings.delete_booking(&token).await {
        Ok(()) => {
            metrics::record("delete", "ok");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            metrics::record("delete", metrics::outcome(&e));
            Err(BookingApiError::lookup(e))
        }
    }
}
