//! REST API module using Axum
//!
//! HTTP endpoints for the wall-guard dashboard:
//! - `GET  /api/v1/health` — liveness and uptime
//! - `GET  /api/v1/status` — latest tick output and session counters
//! - `GET  /api/v1/log` — alert log, optional `?tier=` filter
//! - `POST /api/v1/override` — engage a demo override (impact/fall)
//! - `POST /api/v1/log/clear` — bulk-clear the alert log
//!
//! The API is a pure consumer of the tick loop's published state; the only
//! inputs flowing back are the override trigger and the log-clear command,
//! both queued as commands the loop drains on its next tick.

mod envelope;
mod handlers;
mod routes;

pub use envelope::{ApiErrorResponse, ApiResponse};
pub use handlers::DashboardState;
pub use routes::create_app;
