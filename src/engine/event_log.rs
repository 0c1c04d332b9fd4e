//! Bounded, edge-triggered alert log.

use crate::types::{EventDecision, EventLabel, LogEntry, RiskTier};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Most-recent-first record of risk-worthy state transitions.
///
/// An entry is created only when the decided label is non-NORMAL *and*
/// differs from the previous tick's label (edge-triggered, not
/// level-triggered). Capacity overflow silently evicts the oldest entry at
/// the tail — never an error.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a transition if it is risk-worthy and edge-triggered.
    ///
    /// `previous` is the label decided on the previous tick. Returns
    /// whether an entry was appended.
    pub fn record(
        &mut self,
        decision: &EventDecision,
        previous: EventLabel,
        now: DateTime<Utc>,
        detail: String,
    ) -> bool {
        if decision.label == EventLabel::Normal || decision.label == previous {
            return false;
        }

        self.entries.push_front(LogEntry {
            timestamp: now,
            label: decision.label,
            tier: decision.tier,
            detail,
        });
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
        true
    }

    /// Entries filtered by tier, most-recent-first (the storage order).
    pub fn query(&self, tier: Option<RiskTier>) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| tier.map_or(true, |t| e.tier == t))
            .cloned()
            .collect()
    }

    /// Full snapshot, most-recent-first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Bulk clear (external operation from the presentation boundary).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(label: EventLabel) -> EventDecision {
        EventDecision {
            label,
            tier: label.risk_tier(),
            confidence: 95.0,
            display_impact: 20_000.0,
        }
    }

    #[test]
    fn test_normal_is_never_logged() {
        let mut log = EventLog::new(50);
        let appended = log.record(
            &decision(EventLabel::Normal),
            EventLabel::Fall,
            Utc::now(),
            "T: 24.0°C / I: 16384".into(),
        );
        assert!(!appended);
        assert!(log.is_empty());
    }

    #[test]
    fn test_consecutive_identical_labels_log_once() {
        let mut log = EventLog::new(50);
        let now = Utc::now();
        assert!(log.record(&decision(EventLabel::Fall), EventLabel::Normal, now, "a".into()));
        assert!(!log.record(&decision(EventLabel::Fall), EventLabel::Fall, now, "b".into()));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_re_entering_state_logs_again() {
        let mut log = EventLog::new(50);
        let now = Utc::now();
        // NORMAL → FALL → NORMAL → FALL produces two entries.
        log.record(&decision(EventLabel::Fall), EventLabel::Normal, now, "1".into());
        log.record(&decision(EventLabel::Normal), EventLabel::Fall, now, "x".into());
        log.record(&decision(EventLabel::Fall), EventLabel::Normal, now, "2".into());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_most_recent_first_ordering() {
        let mut log = EventLog::new(50);
        let now = Utc::now();
        log.record(&decision(EventLabel::Fall), EventLabel::Normal, now, "old".into());
        log.record(&decision(EventLabel::Impact), EventLabel::Fall, now, "new".into());
        let entries = log.snapshot();
        assert_eq!(entries[0].detail, "new");
        assert_eq!(entries[1].detail, "old");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = EventLog::new(50);
        let now = Utc::now();
        // 51 alternating risk-worthy transitions.
        let mut previous = EventLabel::Normal;
        for i in 0..51 {
            let label = if i % 2 == 0 {
                EventLabel::Fall
            } else {
                EventLabel::Impact
            };
            assert!(log.record(&decision(label), previous, now, format!("{i}")));
            previous = label;
        }
        assert_eq!(log.len(), 50);
        let entries = log.snapshot();
        // Entry "0" (the oldest) was evicted from the tail.
        assert_eq!(entries[0].detail, "50");
        assert_eq!(entries[49].detail, "1");
    }

    #[test]
    fn test_query_filters_by_tier() {
        let mut log = EventLog::new(50);
        let now = Utc::now();
        log.record(&decision(EventLabel::Fall), EventLabel::Normal, now, "d".into());
        log.record(&decision(EventLabel::Animal), EventLabel::Fall, now, "c".into());
        assert_eq!(log.query(Some(RiskTier::Danger)).len(), 1);
        assert_eq!(log.query(Some(RiskTier::Caution)).len(), 1);
        assert_eq!(log.query(None).len(), 2);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = EventLog::new(50);
        log.record(
            &decision(EventLabel::Fall),
            EventLabel::Normal,
            Utc::now(),
            "x".into(),
        );
        log.clear();
        assert!(log.is_empty());
    }
}
