use thiserror::Error;

pub const CONFLICT_MESSAGE: &str = "Time slot already booked in this municipality.";
pub const LEAD_TIME_MESSAGE: &str = "Pick a time slot with at least 1 hour in advance.";

/// Business errors for booking workflows
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Time slot already booked in this municipality.")]
    Conflict,
    #[error("{0}")]
    Validation(String),
    #[error("Service request with token {0} not found.")]
    NotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl BookingError {
    pub fn lead_time() -> Self { Self::Validation(LEAD_TIME_MESSAGE.to_string()) }

    pub fn not_found(token: &str) -> Self { Self::NotFound(token.to_string()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            BookingError::Conflict => 2001,
            BookingError::Validation(_) => 2002,
            BookingError::NotFound(_) => 2003,
            BookingError::Repository(_) => 2100,
        }
    }
}

/// Failures reported by a booking store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("time slot held by another booking")]
    SlotTaken,
    #[error("database error: {0}")]
    Db(String),
}

impl From<RepositoryError> for BookingError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::SlotTaken => BookingError::Conflict,
            RepositoryError::Db(msg) => BookingError::Repository(msg),
        }
    }
}

impl From<models::errors::ModelError> for RepositoryError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::UniqueViolation(_) => RepositoryError::SlotTaken,
            models::errors::ModelError::Db(msg) => RepositoryError::Db(msg),
        }
    }
}
