//! Per-session monitoring context.
//!
//! All mutable core state — the multi-scale buffer, the coordinate history,
//! the alert log, the override lock, and the previous-tick label — is owned
//! by one [`GuardSession`], constructed empty and mutated only by the tick
//! loop that owns it. A multi-session deployment runs one independent
//! instance per monitored site; nothing here is shared.

use crate::classifier::{ClassifierHandle, SceneFeatures};
use crate::config::GuardConfig;
use crate::engine::{DecisionEngine, EventLog, OverrideKind, OverrideLock};
use crate::features::{heat_center, CoordinateSmoother, MultiScaleBuffer};
use crate::types::{
    EventLabel, FrameError, LogEntry, RiskTier, SensorFrame, SmoothedPoint, TickOutput,
};
use chrono::{DateTime, Duration, Utc};

/// One monitored session: state + policy, driven one frame at a time.
pub struct GuardSession {
    engine: DecisionEngine,
    classifier: ClassifierHandle,
    buffer: MultiScaleBuffer,
    smoother: CoordinateSmoother,
    log: EventLog,
    override_lock: Option<OverrideLock>,
    last_label: EventLabel,
    ticks_processed: u64,
}

impl GuardSession {
    /// Construct a session with empty buffers and log.
    pub fn new(config: &GuardConfig, classifier: ClassifierHandle) -> Self {
        Self {
            engine: DecisionEngine::new(config.engine.thresholds()),
            classifier,
            buffer: MultiScaleBuffer::new(config.buffers.short_term, config.buffers.long_term),
            smoother: CoordinateSmoother::new(config.buffers.smoothing_window),
            log: EventLog::new(config.buffers.log_capacity),
            override_lock: None,
            last_label: EventLabel::Normal,
            ticks_processed: 0,
        }
    }

    /// Engage a demo override, unconditionally replacing any existing lock.
    pub fn trigger_override(&mut self, kind: OverrideKind, duration: Duration, now: DateTime<Utc>) {
        let lock = OverrideLock::engage(kind, now, duration);
        tracing::info!(kind = %kind, until = %lock.until, "Override lock engaged");
        self.override_lock = Some(lock);
    }

    /// Process one frame end-to-end and return the tick output.
    ///
    /// The frame is validated at this boundary; a malformed frame rejects
    /// the whole tick without touching session state.
    pub fn process_frame(
        &mut self,
        frame: &SensorFrame,
        now: DateTime<Utc>,
    ) -> Result<TickOutput, FrameError> {
        frame.validate()?;

        // Drop an expired lock so it does not linger in status output.
        if self.override_lock.is_some_and(|l| !l.is_active(now)) {
            self.override_lock = None;
        }

        // Temporal buffers update every tick, classifier or not, so the
        // feature history is intact if the classifier appears later.
        self.buffer.update(frame.impact, frame.detected);
        let temporal = self.buffer.features();
        let scene_temp = frame.scene_temp();

        let features = SceneFeatures::new(scene_temp, temporal.peak_impact, temporal.loitering_score);
        let base = self.classifier.predict(&features);

        let decision = self
            .engine
            .decide(base, frame.impact, now, self.override_lock.as_ref());

        let smoothed = if frame.detected {
            let (raw_row, raw_col) = heat_center(&frame.grid);
            let (row, col) = self.smoother.update(raw_row as f64, raw_col as f64);
            Some(SmoothedPoint { row, col })
        } else {
            None
        };

        let detail = format!(
            "T: {:.1}°C / I: {}",
            scene_temp, decision.display_impact as i64
        );
        if self.log.record(&decision, self.last_label, now, detail) {
            tracing::info!(
                label = %decision.label,
                tier = %decision.tier,
                impact = decision.display_impact,
                confidence = decision.confidence,
                "Scene transition recorded"
            );
        }

        self.last_label = decision.label;
        self.ticks_processed += 1;

        Ok(TickOutput {
            timestamp: now,
            label: decision.label,
            tier: decision.tier,
            confidence: decision.confidence,
            impact: decision.display_impact,
            scene_temp,
            smoothed,
        })
    }

    /// Alert-log snapshot, most-recent-first.
    pub fn log_snapshot(&self) -> Vec<LogEntry> {
        self.log.snapshot()
    }

    /// Alert-log entries filtered by tier.
    pub fn log_query(&self, tier: Option<RiskTier>) -> Vec<LogEntry> {
        self.log.query(tier)
    }

    /// Bulk-clear the alert log (presentation-boundary command).
    pub fn clear_log(&mut self) {
        tracing::info!(discarded = self.log.len(), "Alert log cleared");
        self.log.clear();
    }

    pub fn ticks_processed(&self) -> u64 {
        self.ticks_processed
    }

    pub fn events_logged(&self) -> usize {
        self.log.len()
    }

    pub fn classifier_available(&self) -> bool {
        self.classifier.is_available()
    }
}
