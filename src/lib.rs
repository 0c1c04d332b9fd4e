//! WALL-GUARD: Thermal/Vibration Perimeter Monitoring
//!
//! Simulated security-monitoring service: per tick it ingests an 8x8
//! thermal grid plus a vibration impact reading, extracts temporal
//! features, classifies the scene, applies override/suppression policy,
//! and publishes the decision and a bounded alert log over a JSON API.
//!
//! ## Architecture
//!
//! - **Features**: coordinate smoother, multi-scale impact/presence buffer,
//!   hot-spot locator
//! - **Classifier**: pre-trained scene model behind a capability handle
//! - **Engine**: decision policy (suppression, overrides, thresholds) and
//!   the edge-triggered alert log
//! - **Session**: one context object owning all mutable core state
//! - **Pipeline**: frame sources and the paced tick loop
//! - **API**: axum dashboard endpoints

pub mod api;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod features;
pub mod pipeline;
pub mod session;
pub mod simulator;
pub mod types;

// Re-export configuration
pub use config::GuardConfig;

// Re-export commonly used types
pub use types::{
    EventDecision, EventLabel, FrameError, LogEntry, RiskTier, SensorFrame, SmoothedPoint,
    TickOutput,
};

// Re-export the core components
pub use classifier::{ClassifierHandle, NearestCentroidClassifier, SceneClassifier, SceneFeatures};
pub use engine::{DecisionEngine, DecisionThresholds, EventLog, OverrideKind, OverrideLock};
pub use features::{heat_center, CoordinateSmoother, MultiScaleBuffer};
pub use session::GuardSession;
pub use simulator::FrameSimulator;
