//! Event decision policy core
//!
//! Combines the classifier's base prediction, the instantaneous impact
//! reading, and any active demo override into the final per-tick decision,
//! and maintains the bounded edge-triggered alert log.
//!
//! Decision order (each step may override the previous):
//! 1. base prediction from the classifier (NORMAL if unavailable)
//! 2. stale-evidence suppression (low instantaneous impact cancels
//!    IMPACT/FALL predictions)
//! 3. active override lock — unconditional demo forcing
//! 4. instantaneous impact thresholds (no lock only)
//! 5. confidence finalization
//! 6. risk-tier mapping

mod decision;
mod event_log;
mod override_lock;

pub use decision::{DecisionEngine, DecisionThresholds, DEFAULT_CONFIDENCE};
pub use event_log::EventLog;
pub use override_lock::{OverrideKind, OverrideLock, DEFAULT_OVERRIDE_SECS};
