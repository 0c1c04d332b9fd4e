//! API request handlers.

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::engine::{OverrideKind, DEFAULT_OVERRIDE_SECS};
use crate::pipeline::{AppState, OverrideRequest};
use crate::types::{LogEntry, RiskTier, TickOutput};
use axum::extract::{Query, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handler state.
#[derive(Clone)]
pub struct DashboardState {
    pub app_state: Arc<RwLock<AppState>>,
    pub node_id: String,
    pub node_location: String,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
    pub classifier_available: bool,
}

pub async fn health(State(state): State<DashboardState>) -> Response {
    let app = state.app_state.read().await;
    ApiResponse::ok(HealthBody {
        status: "ok".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: app.uptime_secs(),
        classifier_available: app.classifier_available,
    })
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub node_id: String,
    pub location: String,
    pub system_status: crate::pipeline::SystemStatus,
    pub ticks_processed: u64,
    pub events_logged: usize,
    pub latest: TickOutput,
}

pub async fn status(State(state): State<DashboardState>) -> Response {
    let app = state.app_state.read().await;
    match &app.latest {
        Some(latest) => ApiResponse::ok(StatusBody {
            node_id: state.node_id.clone(),
            location: state.node_location.clone(),
            system_status: app.status,
            ticks_processed: app.ticks_processed,
            events_logged: app.log_snapshot.len(),
            latest: latest.clone(),
        }),
        None => ApiErrorResponse::service_unavailable("no tick processed yet"),
    }
}

// ============================================================================
// Alert Log
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub tier: Option<RiskTier>,
}

#[derive(Debug, Serialize)]
pub struct LogBody {
    pub total: usize,
    pub entries: Vec<LogEntry>,
}

pub async fn log(
    State(state): State<DashboardState>,
    Query(query): Query<LogQuery>,
) -> Response {
    let app = state.app_state.read().await;
    let entries: Vec<LogEntry> = app
        .log_snapshot
        .iter()
        .filter(|e| query.tier.map_or(true, |t| e.tier == t))
        .cloned()
        .collect();
    ApiResponse::ok(LogBody {
        total: entries.len(),
        entries,
    })
}

pub async fn clear_log(State(state): State<DashboardState>) -> Response {
    let mut app = state.app_state.write().await;
    app.clear_log_requested = true;
    ApiResponse::ok(serde_json::json!({ "queued": true }))
}

// ============================================================================
// Override Trigger
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OverrideBody {
    pub kind: OverrideKind,
    pub duration_secs: Option<i64>,
}

pub async fn trigger_override(
    State(state): State<DashboardState>,
    axum::Json(body): axum::Json<OverrideBody>,
) -> Response {
    let duration_secs = body.duration_secs.unwrap_or(DEFAULT_OVERRIDE_SECS);
    if duration_secs <= 0 {
        return ApiErrorResponse::bad_request("duration_secs must be positive");
    }

    let mut app = state.app_state.write().await;
    // Last write wins — a queued request is simply replaced.
    app.pending_override = Some(OverrideRequest {
        kind: body.kind,
        duration_secs,
    });

    ApiResponse::ok(serde_json::json!({
        "queued": true,
        "kind": body.kind,
        "duration_secs": duration_secs,
    }))
}
