//! Shared data structures for the wall-guard monitoring pipeline
//!
//! This module defines the core types for the per-tick decision pipeline:
//! - SensorFrame (thermal grid + vibration sample, validated at ingestion)
//! - EventLabel / RiskTier (scene classification and severity bucket)
//! - EventDecision (per-tick policy output)
//! - LogEntry (bounded alert-log record)
//! - TickOutput (the tuple published to the presentation boundary)

mod event;
mod frame;

pub use event::*;
pub use frame::*;
