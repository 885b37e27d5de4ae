use axum::{extract::State, Json};
use tracing::info;

use crate::{errors::JsonApiError, metrics, routes::AppState};

/// Municipality names from the external directory, for client selection lists.
#[utoipa::path(
    get, path = "/api/municipalities", tag = "municipalities",
    responses(
        (status = 200, description = "Municipality names", body = [String]),
        (status = 500, description = "Directory unavailable")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<String>>, JsonApiError> {
    match state.directory.municipalities().await {
        Ok(names) => {
            info!(count = names.len(), "list municipalities");
            metrics::record_directory("ok");
            Ok(Json(names))
        }
        Err(e) => {
            metrics::record_directory("error");
            Err(e.into())
        }
    }
}
