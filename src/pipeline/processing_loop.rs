//! The tick loop: one frame processed end-to-end per iteration.
//!
//! Single-threaded cooperative scheduling — the loop owns the session
//! outright, so no locking guards any core state. The fixed inter-tick
//! delay paces the loop to ≈2.5 ticks/s; it bounds resource usage and
//! carries no ordering obligation.

use crate::session::GuardSession;
use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::source::{FrameEvent, FrameSource};
use super::{AppState, SystemStatus};

/// Final statistics returned when the loop stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopStats {
    pub ticks_processed: u64,
    pub frames_rejected: u64,
}

/// Owns the session and drives it from a frame source until cancellation,
/// EOF, or an optional tick budget is reached.
pub struct ProcessingLoop {
    session: GuardSession,
    app_state: Arc<RwLock<AppState>>,
    cancel_token: CancellationToken,
    tick_interval: Duration,
    /// Stop after this many ticks; 0 = unbounded
    max_ticks: u64,
}

impl ProcessingLoop {
    pub fn new(
        session: GuardSession,
        app_state: Arc<RwLock<AppState>>,
        cancel_token: CancellationToken,
        tick_interval: Duration,
        max_ticks: u64,
    ) -> Self {
        Self {
            session,
            app_state,
            cancel_token,
            tick_interval,
            max_ticks,
        }
    }

    /// Run until the source is exhausted, cancellation, or the tick budget.
    pub async fn run<S: FrameSource>(mut self, source: &mut S) -> LoopStats {
        let mut stats = LoopStats::default();
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        info!(
            source = source.source_name(),
            interval_ms = self.tick_interval.as_millis() as u64,
            "Tick loop started"
        );

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("[TickLoop] Shutdown signal received");
                    break;
                }
                _ = interval.tick() => {}
            }

            // Drain commands queued by the API since the last tick.
            let (override_req, clear_requested) = {
                let mut state = self.app_state.write().await;
                (
                    state.pending_override.take(),
                    std::mem::take(&mut state.clear_log_requested),
                )
            };

            if clear_requested {
                self.session.clear_log();
            }
            if let Some(req) = override_req {
                let now = Utc::now();
                self.session.trigger_override(
                    req.kind,
                    ChronoDuration::seconds(req.duration_secs),
                    now,
                );
                // Demo triggers also force the simulator to emit a matching
                // hot frame, so the displayed grid agrees with the forced
                // decision.
                source.force_scenario(req.kind);
            }

            let event = match source.next_frame().await {
                Ok(ev) => ev,
                Err(e) => {
                    warn!("[TickLoop] Source error: {}", e);
                    break;
                }
            };

            let frame = match event {
                FrameEvent::Frame(f) => f,
                FrameEvent::Eof => {
                    info!(
                        "[TickLoop] Source reached end ({} ticks processed)",
                        stats.ticks_processed
                    );
                    break;
                }
            };

            let now = Utc::now();
            match self.session.process_frame(&frame, now) {
                Ok(output) => {
                    stats.ticks_processed += 1;

                    let mut state = self.app_state.write().await;
                    state.status = match output.tier {
                        crate::types::RiskTier::Danger => SystemStatus::Alert,
                        _ => SystemStatus::Monitoring,
                    };
                    state.log_snapshot = self.session.log_snapshot();
                    state.ticks_processed = self.session.ticks_processed();
                    state.latest = Some(output);
                }
                Err(e) => {
                    stats.frames_rejected += 1;
                    warn!(error = %e, "Malformed frame rejected — tick skipped");
                }
            }

            if self.max_ticks > 0 && stats.ticks_processed >= self.max_ticks {
                info!(ticks = stats.ticks_processed, "Tick budget reached");
                break;
            }
        }

        info!(
            ticks = stats.ticks_processed,
            rejected = stats.frames_rejected,
            "Tick loop stopped"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierHandle;
    use crate::config::GuardConfig;
    use crate::engine::OverrideKind;
    use crate::pipeline::SimulatedSource;

    #[tokio::test]
    async fn test_loop_respects_tick_budget() {
        let config = GuardConfig::default();
        let session = GuardSession::new(&config, ClassifierHandle::Unavailable);
        let app_state = Arc::new(RwLock::new(AppState::new(false)));
        let token = CancellationToken::new();

        let processing = ProcessingLoop::new(
            session,
            Arc::clone(&app_state),
            token,
            Duration::from_millis(1),
            5,
        );
        let mut source = SimulatedSource::new().unwrap();
        let stats = processing.run(&mut source).await;

        assert_eq!(stats.ticks_processed, 5);
        let state = app_state.read().await;
        assert_eq!(state.ticks_processed, 5);
        assert!(state.latest.is_some());
        assert_ne!(state.status, SystemStatus::Initializing);
    }

    #[tokio::test]
    async fn test_loop_stops_on_cancellation() {
        let config = GuardConfig::default();
        let session = GuardSession::new(&config, ClassifierHandle::Unavailable);
        let app_state = Arc::new(RwLock::new(AppState::new(false)));
        let token = CancellationToken::new();
        token.cancel();

        let processing = ProcessingLoop::new(
            session,
            app_state,
            token,
            Duration::from_millis(1),
            0,
        );
        let mut source = SimulatedSource::new().unwrap();
        let stats = processing.run(&mut source).await;
        assert_eq!(stats.ticks_processed, 0);
    }

    #[tokio::test]
    async fn test_pending_override_is_applied() {
        let config = GuardConfig::default();
        let session = GuardSession::new(&config, ClassifierHandle::Unavailable);
        let app_state = Arc::new(RwLock::new(AppState::new(false)));
        {
            let mut state = app_state.write().await;
            state.pending_override = Some(super::super::OverrideRequest {
                kind: OverrideKind::Impact,
                duration_secs: 3,
            });
        }
        let token = CancellationToken::new();

        let processing = ProcessingLoop::new(
            session,
            Arc::clone(&app_state),
            token,
            Duration::from_millis(1),
            1,
        );
        let mut source = SimulatedSource::new().unwrap();
        processing.run(&mut source).await;

        let state = app_state.read().await;
        let latest = state.latest.as_ref().unwrap();
        assert_eq!(latest.label, crate::types::EventLabel::Impact);
        assert_eq!(latest.impact, 28_000.0);
        assert_eq!(state.status, SystemStatus::Alert);
        assert!(state.pending_override.is_none());
    }
}
