//! Guard node configuration
//!
//! Per-node configuration loaded from TOML, replacing hardcoded policy
//! thresholds with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. Explicit `--config` path from the CLI
//! 2. `WALL_GUARD_CONFIG` environment variable (path to TOML file)
//! 3. `wall_guard.toml` in the current working directory
//! 4. Built-in defaults (matching the original hardcoded values)
//!
//! The config is plumbed explicitly into session/engine construction — the
//! core carries no ambient globals.

use crate::engine::DecisionThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV_VAR: &str = "WALL_GUARD_CONFIG";

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "wall_guard.toml";

/// Top-level configuration for one guard node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub node: NodeConfig,
    pub engine: EngineConfig,
    pub buffers: BufferConfig,
    #[serde(rename = "loop")]
    pub tick: TickConfig,
    pub classifier: ClassifierConfig,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            engine: EngineConfig::default(),
            buffers: BufferConfig::default(),
            tick: TickConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Identity of the monitored site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub id: String,
    pub location: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            id: "MAPO-A1".to_string(),
            location: "Mapo-gu, Seoul".to_string(),
        }
    }
}

/// Decision policy thresholds (see engine docs for interval semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub suppression_floor: f64,
    pub impact_min: f64,
    pub fall_min: f64,
    pub fall_max: f64,
    pub override_impact_display: f64,
    pub override_fall_display: f64,
    pub impact_confidence: f64,
    pub fall_confidence: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let t = DecisionThresholds::default();
        Self {
            suppression_floor: t.suppression_floor,
            impact_min: t.impact_min,
            fall_min: t.fall_min,
            fall_max: t.fall_max,
            override_impact_display: t.override_impact_display,
            override_fall_display: t.override_fall_display,
            impact_confidence: t.impact_confidence,
            fall_confidence: t.fall_confidence,
        }
    }
}

impl EngineConfig {
    pub fn thresholds(&self) -> DecisionThresholds {
        DecisionThresholds {
            suppression_floor: self.suppression_floor,
            impact_min: self.impact_min,
            fall_min: self.fall_min,
            fall_max: self.fall_max,
            override_impact_display: self.override_impact_display,
            override_fall_display: self.override_fall_display,
            impact_confidence: self.impact_confidence,
            fall_confidence: self.fall_confidence,
        }
    }
}

/// Window capacities for the rolling buffers and the alert log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub short_term: usize,
    pub long_term: usize,
    pub smoothing_window: usize,
    pub log_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            short_term: 10,
            long_term: 60,
            smoothing_window: 5,
            log_capacity: 50,
        }
    }
}

/// Tick-loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Inter-tick delay in milliseconds (≈2.5 ticks/s by default)
    pub interval_ms: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self { interval_ms: 400 }
    }
}

/// Classifier model selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Path to a JSON model file; `None` selects the built-in model
    pub model_path: Option<PathBuf>,
}

impl GuardConfig {
    /// Load configuration following the documented precedence order.
    ///
    /// A missing file falls back to defaults with an info log; a file that
    /// exists but fails to parse is a startup error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidate: Option<PathBuf> = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
            .or_else(|| {
                let default = PathBuf::from(CONFIG_FILE);
                default.exists().then_some(default)
            });

        match candidate {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                let config: Self = toml::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?;
                tracing::info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            None => {
                tracing::info!("No config file found — using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_constants() {
        let config = GuardConfig::default();
        assert_eq!(config.engine.suppression_floor, 17_000.0);
        assert_eq!(config.engine.impact_min, 24_000.0);
        assert_eq!(config.buffers.short_term, 10);
        assert_eq!(config.buffers.long_term, 60);
        assert_eq!(config.buffers.smoothing_window, 5);
        assert_eq!(config.buffers.log_capacity, 50);
        assert_eq!(config.tick.interval_ms, 400);
        assert!(config.classifier.model_path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: GuardConfig = toml::from_str(
            r#"
            [node]
            id = "TEST-01"

            [engine]
            impact_min = 26000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.node.id, "TEST-01");
        assert_eq!(config.engine.impact_min, 26_000.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.engine.fall_min, 17_500.0);
        assert_eq!(config.buffers.log_capacity, 50);
    }

    #[test]
    fn test_loop_section_name() {
        let config: GuardConfig = toml::from_str(
            r#"
            [loop]
            interval_ms = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.tick.interval_ms, 100);
    }
}
