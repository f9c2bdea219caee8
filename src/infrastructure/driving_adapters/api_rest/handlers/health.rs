//! Health Handler

use axum::{routing::get, Json, Router};

use crate::infrastructure::driving_adapters::api_rest::dto::section::HealthResponseDto;
use crate::infrastructure::driving_adapters::api_rest::AppState;

/// Create the router for the liveness probe
pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// GET /healthz - Liveness probe
async fn healthz() -> Json<HealthResponseDto> {
    Json(HealthResponseDto { ok: true })
}
