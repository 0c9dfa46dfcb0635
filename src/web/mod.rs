//! # Web API Module
//!
//! Axum-based HTTP surface for the orchestrator. The transport is a thin
//! layer: handlers validate input, call the lifecycle manager and translate
//! its error taxonomy into status codes. All interesting invariants live
//! below, in [`crate::lifecycle`].
//!
//! ## Core Components
//!
//! - [`state`] - Shared application state (config + injected pool + lifecycle)
//! - [`handlers`] - Request handlers grouped by functional area
//! - [`middleware`] - Request-id tagging
//! - [`response_types`] - API error type and HTTP conversions

pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;

use state::AppState;

/// Instance lifecycle routes.
fn instance_routes() -> Router<AppState> {
    Router::new()
        .route("/instances", get(handlers::instances::instances_root))
        .route("/instances/create", post(handlers::instances::create_instance))
        .route("/instances/:schema", delete(handlers::instances::delete_instance))
}

/// Root, health and readiness routes.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::basic_health))
        .route("/health/ready", get(handlers::health::readiness_probe))
}

/// Create the main Axum application with all routes and middleware.
pub fn create_app(app_state: AppState) -> Router {
    Router::new()
        .merge(instance_routes())
        .merge(health_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ))
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}
