//! Shared application state between the tick loop and the API.

use crate::engine::OverrideKind;
use crate::types::{LogEntry, TickOutput};
use std::time::Instant;

/// Override command queued by the API, consumed by the tick loop.
///
/// Only the latest request survives until the next tick (last write wins,
/// no queuing — matching the override-lock race semantics).
#[derive(Debug, Clone, Copy)]
pub struct OverrideRequest {
    pub kind: OverrideKind,
    pub duration_secs: i64,
}

/// State shared between the tick loop (writer) and API handlers (readers).
///
/// Wrapped in `Arc<RwLock<>>` across the async runtime. The session itself
/// is *not* shared — the loop owns it; this is only the published view plus
/// the command mailbox.
#[derive(Debug)]
pub struct AppState {
    /// Process start, for uptime reporting
    pub started_at: Instant,

    /// Current system status
    pub status: SystemStatus,

    /// Latest tick output for the dashboard
    pub latest: Option<TickOutput>,

    /// Alert-log snapshot, most-recent-first
    pub log_snapshot: Vec<LogEntry>,

    /// Ticks processed so far
    pub ticks_processed: u64,

    /// Whether the classifier resolved as available at startup
    pub classifier_available: bool,

    /// Pending override command from the API (drained each tick)
    pub pending_override: Option<OverrideRequest>,

    /// Pending log-clear command from the API (drained each tick)
    pub clear_log_requested: bool,
}

impl AppState {
    pub fn new(classifier_available: bool) -> Self {
        Self {
            started_at: Instant::now(),
            status: SystemStatus::Initializing,
            latest: None,
            log_snapshot: Vec::new(),
            ticks_processed: 0,
            classifier_available,
            pending_override: None,
            clear_log_requested: false,
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// System operational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    /// Starting up, no tick processed yet
    Initializing,
    /// Normal operation, monitoring active
    Monitoring,
    /// Latest tick decided a DANGER-tier event
    Alert,
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemStatus::Initializing => write!(f, "Initializing"),
            SystemStatus::Monitoring => write!(f, "Monitoring"),
            SystemStatus::Alert => write!(f, "Alert"),
        }
    }
}
