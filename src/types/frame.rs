//! Sensor frame: one thermal + vibration sample per tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thermal grid dimension (the sensor reports an 8x8 pixel array).
pub const GRID_DIM: usize = 8;

/// Resting vibration-sensor reading (raw ADC units, no shock).
pub const IMPACT_BASELINE: f64 = 16384.0;

/// Grid temperature above which an object is considered present (°C).
pub const DETECTION_TEMP: f64 = 30.0;

/// One 8x8 thermal reading, row-major, degrees Celsius.
pub type ThermalGrid = [[f64; GRID_DIM]; GRID_DIM];

/// Errors raised at the frame-ingestion boundary.
///
/// A malformed frame is a contract violation by the upstream sensor
/// collaborator: the tick is rejected, the session state is untouched.
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("non-finite impact reading: {0}")]
    NonFiniteImpact(f64),

    #[error("non-finite grid cell at ({row}, {col})")]
    NonFiniteCell { row: usize, col: usize },
}

/// One sensor sample, produced once per tick by the frame source.
///
/// Immutable after creation; not retained beyond the tick that produced it
/// except inside the session's rolling buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorFrame {
    /// 8x8 thermal grid (°C)
    pub grid: ThermalGrid,

    /// Scalar vibration magnitude (raw units, baseline ≈ 16384)
    pub impact: f64,

    /// Object-present flag from the upstream detector
    pub detected: bool,

    /// Sample timestamp
    pub timestamp: DateTime<Utc>,
}

impl SensorFrame {
    /// Validate the frame at the ingestion boundary.
    ///
    /// The decision engine is specified only for well-formed input, so
    /// rejection happens here and nowhere downstream.
    pub fn validate(&self) -> Result<(), FrameError> {
        if !self.impact.is_finite() {
            return Err(FrameError::NonFiniteImpact(self.impact));
        }
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.is_finite() {
                    return Err(FrameError::NonFiniteCell { row, col });
                }
            }
        }
        Ok(())
    }

    /// Hottest reading in the grid, used as the scene-temperature feature.
    pub fn scene_temp(&self) -> f64 {
        self.grid
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(temp: f64, impact: f64) -> SensorFrame {
        SensorFrame {
            grid: [[temp; GRID_DIM]; GRID_DIM],
            impact,
            detected: false,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_frame() {
        assert!(uniform_frame(24.0, IMPACT_BASELINE).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite_impact() {
        let frame = uniform_frame(24.0, f64::NAN);
        assert!(matches!(
            frame.validate(),
            Err(FrameError::NonFiniteImpact(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_cell() {
        let mut frame = uniform_frame(24.0, IMPACT_BASELINE);
        frame.grid[3][5] = f64::INFINITY;
        assert_eq!(
            frame.validate(),
            Err(FrameError::NonFiniteCell { row: 3, col: 5 })
        );
    }

    #[test]
    fn test_scene_temp_is_grid_max() {
        let mut frame = uniform_frame(24.0, IMPACT_BASELINE);
        frame.grid[6][2] = 37.5;
        assert_eq!(frame.scene_temp(), 37.5);
    }
}
