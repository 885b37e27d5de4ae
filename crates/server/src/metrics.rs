use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::errors::BookingError;

// Prometheus metrics (default registry)
pub static BOOKING_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bulky_booking_requests_total",
        "Booking operations handled, by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register bulky_booking_requests_total")
});

pub static DIRECTORY_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bulky_booking_directory_requests_total",
        "Municipality directory lookups, by outcome",
        &["outcome"]
    )
    .expect("register bulky_booking_directory_requests_total")
});

pub fn outcome(e: &BookingError) -> &'static str {
    match e {
        BookingError::Conflict => "conflict",
        BookingError::Validation(_) => "validation",
        BookingError::NotFound(_) => "not_found",
        BookingError::Repository(_) => "error",
    }
}

pub fn record(operation: &str, outcome: &str) {
    BOOKING_REQUESTS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn record_directory(outcome: &str) {
    DIRECTORY_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
