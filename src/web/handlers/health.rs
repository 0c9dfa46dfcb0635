//! # Health Check Handlers
//!
//! Root banner plus basic and readiness health endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Root endpoint response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub ok: bool,
    pub app: String,
}

/// Basic health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        ok: true,
        app: state.config.app.name.clone(),
    })
}

/// Basic health check endpoint: GET /health
///
/// Returns OK whenever the process is serving; does not touch the database.
pub async fn basic_health(State(_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Readiness probe: GET /health/ready
///
/// Verifies database connectivity with a ping; 503 until the pool can serve
/// a connection.
pub async fn readiness_probe(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    debug!("performing readiness probe");

    sqlx::query("SELECT 1")
        .execute(&state.db_pool)
        .await
        .map_err(|_| ApiError::ServiceUnavailable)?;

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
