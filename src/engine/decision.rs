//! The decision engine: classifier output + impact + override → final call.

use super::{OverrideKind, OverrideLock};
use crate::types::{EventDecision, EventLabel};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Confidence reported for NORMAL ticks and classifier-degraded mode.
pub const DEFAULT_CONFIDENCE: f64 = 99.1;

/// Tunable thresholds for the decision policy.
///
/// The fallback bands are deliberately open intervals: ticks with impact in
/// [23000, 24000] or exactly on a boundary fall through with whatever the
/// filtered base prediction produced. Preserve these comparisons exactly.
#[derive(Debug, Clone, Copy)]
pub struct DecisionThresholds {
    /// Below this, IMPACT/FALL base predictions are suppressed to NORMAL
    pub suppression_floor: f64,
    /// Instantaneous impact strictly above this → IMPACT
    pub impact_min: f64,
    /// Instantaneous impact strictly inside (fall_min, fall_max) → FALL
    pub fall_min: f64,
    pub fall_max: f64,
    /// Displayed impact while an impact override is active
    pub override_impact_display: f64,
    /// Displayed impact while a fall override is active
    pub override_fall_display: f64,
    /// Confidence for forced/threshold IMPACT decisions
    pub impact_confidence: f64,
    /// Confidence for forced/threshold FALL decisions
    pub fall_confidence: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            suppression_floor: 17_000.0,
            impact_min: 24_000.0,
            fall_min: 17_500.0,
            fall_max: 23_000.0,
            override_impact_display: 28_000.0,
            override_fall_display: 20_000.0,
            impact_confidence: 98.5,
            fall_confidence: 96.2,
        }
    }
}

/// Stateless policy core. All mutable state (buffers, lock, log) lives in
/// the session; the engine only reads the lock it is handed.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    thresholds: DecisionThresholds,
}

impl DecisionEngine {
    pub fn new(thresholds: DecisionThresholds) -> Self {
        Self { thresholds }
    }

    /// Produce the final decision for one tick.
    ///
    /// `base` is the classifier's prediction, or `None` when the classifier
    /// is unavailable (degrades to NORMAL). `impact` is the raw reading;
    /// the returned decision carries the display impact, which an active
    /// override rewrites.
    pub fn decide(
        &self,
        base: Option<EventLabel>,
        impact: f64,
        now: DateTime<Utc>,
        lock: Option<&OverrideLock>,
    ) -> EventDecision {
        let t = &self.thresholds;
        let mut label = base.unwrap_or(EventLabel::Normal);

        // Stale-evidence suppression: the temporal buffers can keep a high
        // peak alive for several ticks after the shock has passed. Only the
        // classifier's own prediction is filtered.
        if base.is_some()
            && matches!(label, EventLabel::Impact | EventLabel::Fall)
            && impact < t.suppression_floor
        {
            label = EventLabel::Normal;
        }

        let mut display_impact = impact;
        // None means "not set by override or threshold" — finalized below.
        let mut confidence: Option<f64> = None;

        match lock.filter(|l| l.is_active(now)) {
            Some(lock) => {
                // Demo forcing wins over everything above.
                match lock.kind {
                    OverrideKind::Impact => {
                        label = EventLabel::Impact;
                        display_impact = t.override_impact_display;
                        confidence = Some(t.impact_confidence);
                    }
                    OverrideKind::Fall => {
                        label = EventLabel::Fall;
                        display_impact = t.override_fall_display;
                        confidence = Some(t.fall_confidence);
                    }
                }
            }
            None => {
                // No active lock: instantaneous-threshold fallback.
                if impact > t.impact_min {
                    label = EventLabel::Impact;
                    confidence = Some(t.impact_confidence);
                } else if impact > t.fall_min && impact < t.fall_max {
                    label = EventLabel::Fall;
                    confidence = Some(t.fall_confidence);
                }
            }
        }

        let confidence = match confidence {
            Some(c) => c,
            // Classifier-driven non-NORMAL call: jittered confidence
            // modeling measurement noise.
            None if label != EventLabel::Normal => {
                92.4 + rand::thread_rng().gen_range(-1.0..5.0)
            }
            None => DEFAULT_CONFIDENCE,
        };

        EventDecision {
            label,
            tier: label.risk_tier(),
            confidence,
            display_impact,
        }
    }
}
