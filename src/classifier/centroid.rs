//! Nearest-centroid scene classifier.
//!
//! Stands in for the offline-trained forest: each of the five scene classes
//! is summarized by the mean and spread of its training distribution over
//! (scene_temp, peak_impact, stay_time), and prediction picks the class with
//! the smallest z-score-normalized squared distance. Parameters are loadable
//! from a JSON model file; the built-in defaults match the synthetic
//! training distributions.

use super::{SceneClassifier, SceneFeatures};
use crate::types::EventLabel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-class distribution summary in feature space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCentroid {
    pub label: EventLabel,
    /// Mean (scene_temp, peak_impact, stay_time)
    pub mean: [f64; 3],
    /// Per-dimension spread used for z-score normalization
    pub spread: [f64; 3],
}

impl ClassCentroid {
    /// Squared normalized distance from the centroid.
    fn distance(&self, f: &SceneFeatures) -> f64 {
        let x = [f.scene_temp, f.peak_impact, f.stay_time];
        x.iter()
            .zip(self.mean.iter().zip(self.spread.iter()))
            .map(|(&v, (&m, &s))| {
                let z = (v - m) / s;
                z * z
            })
            .sum()
    }
}

/// Nearest-centroid classifier over the five scene classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroidClassifier {
    centroids: Vec<ClassCentroid>,
}

impl NearestCentroidClassifier {
    /// Built-in model matching the synthetic training distributions:
    /// normal (cool, baseline impact, brief), loitering (body heat, long
    /// dwell), impact (body heat, high shock, brief), fall (body heat, very
    /// high shock, mid dwell), animal (cooler, mid shock, fleeting).
    pub fn builtin() -> Self {
        Self {
            centroids: vec![
                ClassCentroid {
                    label: EventLabel::Normal,
                    mean: [24.0, 16384.0, 2.5],
                    spread: [1.0, 200.0, 1.5],
                },
                ClassCentroid {
                    label: EventLabel::Loitering,
                    mean: [33.0, 16384.0, 75.0],
                    spread: [1.5, 300.0, 26.0],
                },
                ClassCentroid {
                    label: EventLabel::Impact,
                    mean: [34.0, 24000.0, 5.5],
                    spread: [1.0, 1500.0, 2.6],
                },
                ClassCentroid {
                    label: EventLabel::Fall,
                    mean: [32.0, 30000.0, 15.0],
                    spread: [2.0, 2500.0, 2.9],
                },
                ClassCentroid {
                    label: EventLabel::Animal,
                    mean: [28.0, 18000.0, 1.5],
                    spread: [1.0, 1000.0, 0.9],
                },
            ],
        }
    }

    /// Load model parameters from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading classifier model {}", path.display()))?;
        let model: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing classifier model {}", path.display()))?;
        anyhow::ensure!(
            !model.centroids.is_empty(),
            "classifier model has no centroids"
        );
        Ok(model)
    }
}

impl SceneClassifier for NearestCentroidClassifier {
    fn predict(&self, features: &SceneFeatures) -> EventLabel {
        // First centroid wins on exact distance ties (stable ordering).
        let mut best_label = self.centroids[0].label;
        let mut best_dist = self.centroids[0].distance(features);
        for centroid in &self.centroids[1..] {
            let dist = centroid.distance(features);
            if dist < best_dist {
                best_dist = dist;
                best_label = centroid.label;
            }
        }
        best_label
    }
}
