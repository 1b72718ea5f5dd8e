use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, HealthResponse};

/// GET /health
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    if let Err(e) = state.store().ping().await {
        return Err(ApiError::ServiceUnavailable(format!(
            "Database unreachable: {e}"
        )));
    }

    Ok(Json(ApiResponse::success(HealthResponse {
        status: "ok",
        database: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })))
}
