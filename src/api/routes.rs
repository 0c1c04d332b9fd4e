//! API route definitions.

use super::handlers::{self, DashboardState};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the dashboard application router.
pub fn create_app(state: DashboardState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/status", get(handlers::status))
        .route("/api/v1/log", get(handlers::log))
        .route("/api/v1/log/clear", post(handlers::clear_log))
        .route("/api/v1/override", post(handlers::trigger_override))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
