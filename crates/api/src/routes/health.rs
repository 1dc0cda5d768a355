//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::app::AppState;

/// Basic health check.
///
/// GET /api/health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe: verifies database connectivity.
///
/// GET /api/health/ready
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

/// Liveness probe.
///
/// GET /api/health/live
pub async fn live() -> Json<serde_json::Value> {
    Json(json!({ "status": "alive" }))
}
