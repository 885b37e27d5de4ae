use std::sync::Arc;

use axum::{routing::get, Json, Router};
use service::{
    booking::{BookingRepository, BookingService},
    municipality::MunicipalityDirectory,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{metrics, openapi::{ApiDoc, HealthResponse}};

pub mod bookings;
pub mod municipalities;

pub type SharedBookingService = Arc<BookingService<dyn BookingRepository>>;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub bookings: SharedBookingService,
    pub directory: Arc<dyn MunicipalityDirectory>,
}

impl AppState {
    pub fn new(bookings: SharedBookingService, directory: Arc<dyn MunicipalityDirectory>) -> Self {
        Self { bookings, directory }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: booking API, municipality listing, health, metrics and docs
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/bookings", get(bookings::list).post(bookings::create))
        .route(
            "/api/bookings/:token",
            get(bookings::get).put(bookings::update).delete(bookings::delete),
        )
        .route("/api/bookings/municipality/:municipality", get(bookings::list_by_municipality))
        .route("/api/municipalities", get(municipalities::list));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use service::{booking::repository::memory::InMemoryBookingRepository, municipality::StaticDirectory};
    use tower::ServiceExt;

    fn app() -> Router {
        let repo: Arc<dyn BookingRepository> = Arc::new(InMemoryBookingRepository::default());
        let state = AppState::new(Arc::new(BookingService::new(repo)), Arc::new(StaticDirectory::new(["Estremoz"])));
        build_router(state, CorsLayer::very_permissive())
    }

    #[tokio::test]
    async fn health_reports_ok() -> anyhow::Result<()> {
        let res = app().oneshot(Request::get("/health").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(json["status"], "ok");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_is_404() -> anyhow::Result<()> {
        let res = app().oneshot(Request::get("/api/bookings/nope").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = app().oneshot(Request::delete("/api/bookings/nope").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_is_served() -> anyhow::Result<()> {
        let res = app().oneshot(Request::get("/api-docs/openapi.json").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let doc: serde_json::Value = serde_json::from_slice(&body)?;
        assert!(doc["paths"]["/api/bookings/{token}"].is_object());
        Ok(())
    }
}
