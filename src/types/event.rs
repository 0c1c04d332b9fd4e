//! Event classification labels, risk tiers, and per-tick outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scene classification produced by the classifier / decision engine.
///
/// Discriminants match the classifier's integer label contract
/// (0=normal, 1=loitering, 2=impact, 3=fall, 4=animal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLabel {
    Normal,
    Loitering,
    Impact,
    Fall,
    Animal,
}

impl EventLabel {
    /// Map a raw classifier label index to an event label.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Normal),
            1 => Some(Self::Loitering),
            2 => Some(Self::Impact),
            3 => Some(Self::Fall),
            4 => Some(Self::Animal),
            _ => None,
        }
    }

    /// Coarse severity bucket for this label.
    pub fn risk_tier(self) -> RiskTier {
        match self {
            Self::Impact | Self::Fall => RiskTier::Danger,
            Self::Loitering | Self::Animal => RiskTier::Caution,
            Self::Normal => RiskTier::Safe,
        }
    }
}

impl std::fmt::Display for EventLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Loitering => write!(f, "Loitering"),
            Self::Impact => write!(f, "Impact"),
            Self::Fall => write!(f, "Fall"),
            Self::Animal => write!(f, "Animal"),
        }
    }
}

/// Coarse severity bucket derived from the fine-grained label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Safe,
    Caution,
    Danger,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Danger => write!(f, "DANGER"),
        }
    }
}

/// Final per-tick policy output from the decision engine.
///
/// Transient — recomputed every tick, never persisted directly; only the
/// label and tier feed the alert log.
#[derive(Debug, Clone, Serialize)]
pub struct EventDecision {
    pub label: EventLabel,
    pub tier: RiskTier,
    /// Percent, 0–100
    pub confidence: f64,
    /// Impact value for display — rewritten by an active override lock
    pub display_impact: f64,
}

/// One alert-log record. Never mutated after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub label: EventLabel,
    pub tier: RiskTier,
    /// Temperature + impact summary, e.g. "T: 36.2°C / I: 28000"
    pub detail: String,
}

/// Smoothed hot-spot marker position in grid coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmoothedPoint {
    pub row: f64,
    pub col: f64,
}

/// Everything the presentation boundary receives for one tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickOutput {
    pub timestamp: DateTime<Utc>,
    pub label: EventLabel,
    pub tier: RiskTier,
    pub confidence: f64,
    /// Display impact (post override rewrite)
    pub impact: f64,
    /// Hottest grid reading this tick (°C)
    pub scene_temp: f64,
    /// Present only when a hotspot is actively displayed
    pub smoothed: Option<SmoothedPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_index_round_trip() {
        assert_eq!(EventLabel::from_index(0), Some(EventLabel::Normal));
        assert_eq!(EventLabel::from_index(3), Some(EventLabel::Fall));
        assert_eq!(EventLabel::from_index(4), Some(EventLabel::Animal));
        assert_eq!(EventLabel::from_index(5), None);
    }

    #[test]
    fn test_risk_tier_mapping() {
        assert_eq!(EventLabel::Impact.risk_tier(), RiskTier::Danger);
        assert_eq!(EventLabel::Fall.risk_tier(), RiskTier::Danger);
        assert_eq!(EventLabel::Loitering.risk_tier(), RiskTier::Caution);
        assert_eq!(EventLabel::Animal.risk_tier(), RiskTier::Caution);
        assert_eq!(EventLabel::Normal.risk_tier(), RiskTier::Safe);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(format!("{}", RiskTier::Danger), "DANGER");
        assert_eq!(format!("{}", RiskTier::Caution), "CAUTION");
        assert_eq!(format!("{}", RiskTier::Safe), "SAFE");
    }
}
