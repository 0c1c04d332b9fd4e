//! Scene classifier boundary
//!
//! The classifier is an external collaborator: a function from a 3-element
//! feature vector (scene temperature, peak impact, stay-time estimate) to
//! one of five discrete labels. The core treats it as a capability behind
//! [`SceneClassifier`], resolved once at construction into a
//! [`ClassifierHandle`] — availability is never re-checked per tick, and an
//! unavailable classifier degrades to "always NORMAL" rather than erroring.

mod centroid;

pub use centroid::NearestCentroidClassifier;

use crate::types::EventLabel;
use std::path::Path;

/// Multiplier converting the loitering score into a stay-time estimate
/// (seconds) for the classifier feature vector.
pub const STAY_TIME_SCALE: f64 = 30.0;

/// Feature vector handed to the classifier each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFeatures {
    /// Hottest grid reading (°C)
    pub scene_temp: f64,
    /// Peak impact over the short-term window
    pub peak_impact: f64,
    /// Estimated dwell time in seconds (loitering score × 30)
    pub stay_time: f64,
}

impl SceneFeatures {
    pub fn new(scene_temp: f64, peak_impact: f64, loitering_score: f64) -> Self {
        Self {
            scene_temp,
            peak_impact,
            stay_time: loitering_score * STAY_TIME_SCALE,
        }
    }
}

/// Capability interface for the pre-trained scene classifier.
pub trait SceneClassifier: Send + Sync {
    fn predict(&self, features: &SceneFeatures) -> EventLabel;
}

/// Classifier availability, resolved once at startup.
pub enum ClassifierHandle {
    Ready(Box<dyn SceneClassifier>),
    Unavailable,
}

impl ClassifierHandle {
    /// Resolve the classifier from configuration.
    ///
    /// `model_path = None` selects the built-in model. A path that fails to
    /// load degrades to `Unavailable` with a warning — the session keeps
    /// running, predicting NORMAL every tick while buffers stay warm.
    pub fn from_config(model_path: Option<&Path>) -> Self {
        match model_path {
            None => Self::Ready(Box::new(NearestCentroidClassifier::builtin())),
            Some(path) => match NearestCentroidClassifier::from_file(path) {
                Ok(model) => {
                    tracing::info!(path = %path.display(), "Loaded classifier model");
                    Self::Ready(Box::new(model))
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Classifier model unavailable — degrading to NORMAL-only predictions"
                    );
                    Self::Unavailable
                }
            },
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Predict a label, or `None` when the classifier is unavailable.
    pub fn predict(&self, features: &SceneFeatures) -> Option<EventLabel> {
        match self {
            Self::Ready(model) => Some(model.predict(features)),
            Self::Unavailable => None,
        }
    }
}
