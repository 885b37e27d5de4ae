use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::BookingError;
use service::municipality::DirectoryError;
use thiserror::Error;
use tracing::error;

/// JSON error body `{"error": ..., "message": ...}` for server-side failures.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.error, "message": self.message}))).into_response()
    }
}

/// Failures of the booking endpoints. Rule violations go back as plain text,
/// the same way successful writes return the bare token.
#[derive(Debug)]
pub enum BookingApiError {
    BadRequest(String),
    NotFound,
    Internal(String),
}

impl BookingApiError {
    /// Create and update: every business failure is a 400, including an unknown token on update.
    pub fn rejected(e: BookingError) -> Self {
        match e {
            BookingError::Repository(msg) => Self::Internal(msg),
            other => Self::BadRequest(other.to_string()),
        }
    }

    /// Lookup and delete: an unknown token is a 404.
    pub fn lookup(e: BookingError) -> Self {
        match e {
            BookingError::NotFound(_) => Self::NotFound,
            BookingError::Repository(msg) => Self::Internal(msg),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for BookingApiError {
    fn into_response(self) -> Response {
        match self {
            BookingApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            BookingApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            BookingApiError::Internal(msg) => {
                error!(error = %msg, "booking storage failure");
                JsonApiError::internal(msg).into_response()
            }
        }
    }
}

impl From<DirectoryError> for JsonApiError {
    fn from(e: DirectoryError) -> Self {
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Municipality Directory Failed", Some(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_not_found_is_a_bad_request() {
        let e = BookingApiError::rejected(BookingError::not_found("t"));
        assert!(matches!(e, BookingApiError::BadRequest(ref m) if m == "Service request with token t not found."));
        assert_eq!(e.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_not_found_is_404() {
        let resp = BookingApiError::lookup(BookingError::not_found("t")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn repository_failures_are_500() {
        let resp = BookingApiError::rejected(BookingError::Repository("down".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = BookingApiError::rejected(BookingError::Conflict).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
