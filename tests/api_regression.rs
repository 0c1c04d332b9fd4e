//! API regression: envelope shape and command round-trips via tower oneshot.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;
use wall_guard::api::{create_app, DashboardState};
use wall_guard::pipeline::{AppState, SystemStatus};
use wall_guard::types::{EventLabel, RiskTier, TickOutput};
use wall_guard::OverrideKind;

fn test_state(app_state: AppState) -> (DashboardState, Arc<RwLock<AppState>>) {
    let shared = Arc::new(RwLock::new(app_state));
    let dashboard = DashboardState {
        app_state: Arc::clone(&shared),
        node_id: "TEST-01".to_string(),
        node_location: "Test Site".to_string(),
    };
    (dashboard, shared)
}

fn tick_output(label: EventLabel) -> TickOutput {
    TickOutput {
        timestamp: Utc::now(),
        label,
        tier: label.risk_tier(),
        confidence: 96.2,
        impact: 20_000.0,
        scene_temp: 33.1,
        smoothed: None,
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_node_and_classifier() {
    let (state, _) = test_state(AppState::new(true));
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let v = body_json(response).await;
    assert_eq!(v["data"]["status"], "ok");
    assert_eq!(v["data"]["node_id"], "TEST-01");
    assert_eq!(v["data"]["classifier_available"], true);
    assert_eq!(v["meta"]["version"], "1");
}

#[tokio::test]
async fn status_is_unavailable_before_first_tick() {
    let (state, _) = test_state(AppState::new(true));
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let v = body_json(response).await;
    assert_eq!(v["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn status_exposes_latest_tick() {
    let mut app_state = AppState::new(true);
    app_state.latest = Some(tick_output(EventLabel::Fall));
    app_state.status = SystemStatus::Alert;
    app_state.ticks_processed = 42;
    let (state, _) = test_state(app_state);
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let v = body_json(response).await;
    assert_eq!(v["data"]["system_status"], "alert");
    assert_eq!(v["data"]["ticks_processed"], 42);
    assert_eq!(v["data"]["latest"]["label"], "fall");
    assert_eq!(v["data"]["latest"]["tier"], "danger");
}

#[tokio::test]
async fn log_filters_by_tier() {
    let mut app_state = AppState::new(true);
    app_state.log_snapshot = vec![
        wall_guard::types::LogEntry {
            timestamp: Utc::now(),
            label: EventLabel::Fall,
            tier: RiskTier::Danger,
            detail: "T: 33.1°C / I: 20000".to_string(),
        },
        wall_guard::types::LogEntry {
            timestamp: Utc::now(),
            label: EventLabel::Animal,
            tier: RiskTier::Caution,
            detail: "T: 28.0°C / I: 18000".to_string(),
        },
    ];
    let (state, _) = test_state(app_state);
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/log?tier=danger")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let v = body_json(response).await;
    assert_eq!(v["data"]["total"], 1);
    assert_eq!(v["data"]["entries"][0]["label"], "fall");
}

#[tokio::test]
async fn override_request_is_queued_last_write_wins() {
    let (state, shared) = test_state(AppState::new(true));
    let app = create_app(state);

    for kind in ["impact", "fall"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/override")
                    .header("content-type", "application/json")
                    .body(Body::from(format!(r#"{{"kind": "{kind}"}}"#)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app_state = shared.read().await;
    let pending = app_state.pending_override.unwrap();
    assert_eq!(pending.kind, OverrideKind::Fall);
    assert_eq!(pending.duration_secs, 3);
}

#[tokio::test]
async fn override_rejects_non_positive_duration() {
    let (state, shared) = test_state(AppState::new(true));
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/override")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"kind": "impact", "duration_secs": 0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(shared.read().await.pending_override.is_none());
}

#[tokio::test]
async fn log_clear_sets_command_flag() {
    let (state, shared) = test_state(AppState::new(true));
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/log/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(shared.read().await.clear_log_requested);
}
