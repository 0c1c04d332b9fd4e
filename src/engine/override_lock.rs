//! Time-boxed forced classification for demo/test scenarios.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default override duration (seconds) used by the demo trigger.
pub const DEFAULT_OVERRIDE_SECS: i64 = 3;

/// Which event the override forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    Impact,
    Fall,
}

impl std::fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Impact => write!(f, "impact"),
            Self::Fall => write!(f, "fall"),
        }
    }
}

/// An active demo override: forces the decision to `kind` until `until`.
///
/// At most one lock exists per session; engaging a new one unconditionally
/// replaces the previous (last write wins, no queuing). Expiry is purely a
/// timestamp comparison — there is no explicit release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideLock {
    pub kind: OverrideKind,
    pub until: DateTime<Utc>,
}

impl OverrideLock {
    pub fn engage(kind: OverrideKind, now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            kind,
            until: now + duration,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.until
    }
}
