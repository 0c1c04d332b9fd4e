//! Two-horizon rolling buffers for impact and presence features.

use crate::types::IMPACT_BASELINE;
use std::collections::VecDeque;

/// Temporal features derived from the multi-scale buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalFeatures {
    /// Maximum impact in the short-term window (baseline when empty)
    pub peak_impact: f64,
    /// Fraction of recent ticks with an active detection, in [0, 1]
    pub loitering_score: f64,
}

/// Bounded rolling windows over two time horizons.
///
/// Sudden shocks (fall/collision) are best detected from a short recent
/// peak, whereas loitering requires sustained presence over a much longer
/// horizon — a single window would miss one or the other. The buffer is
/// never reset once created; it lives as long as its session.
#[derive(Debug)]
pub struct MultiScaleBuffer {
    short_cap: usize,
    long_cap: usize,
    /// Recent impact scalars (shock detection)
    short_term: VecDeque<f64>,
    /// Recent 0/1 detection flags (loitering detection)
    long_term: VecDeque<u8>,
}

impl MultiScaleBuffer {
    pub fn new(short_cap: usize, long_cap: usize) -> Self {
        let short_cap = short_cap.max(1);
        let long_cap = long_cap.max(1);
        Self {
            short_cap,
            long_cap,
            short_term: VecDeque::with_capacity(short_cap),
            long_term: VecDeque::with_capacity(long_cap),
        }
    }

    /// Append this tick's readings, evicting the oldest beyond capacity.
    pub fn update(&mut self, impact: f64, detected: bool) {
        self.short_term.push_back(impact);
        if self.short_term.len() > self.short_cap {
            self.short_term.pop_front();
        }

        self.long_term.push_back(u8::from(detected));
        if self.long_term.len() > self.long_cap {
            self.long_term.pop_front();
        }
    }

    /// Derive (peak impact, loitering score) from the current windows.
    pub fn features(&self) -> TemporalFeatures {
        let peak_impact = self
            .short_term
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let peak_impact = if self.short_term.is_empty() {
            IMPACT_BASELINE
        } else {
            peak_impact
        };

        let loitering_score = if self.long_term.is_empty() {
            0.0
        } else {
            let hits: u32 = self.long_term.iter().map(|&v| u32::from(v)).sum();
            f64::from(hits) / self.long_term.len() as f64
        };

        TemporalFeatures {
            peak_impact,
            loitering_score,
        }
    }
}
