//! Synthetic sensor-frame generation.
//!
//! Stands in for the real thermal + vibration hardware: each tick produces
//! an ambient 8x8 grid with an optional 2x2 body-heat hotspot and a
//! Gaussian-noise vibration reading around the sensor baseline. One-shot
//! forced scenarios produce the hot, high-impact frames used by the demo
//! override triggers.

use crate::engine::OverrideKind;
use crate::types::{SensorFrame, ThermalGrid, DETECTION_TEMP, GRID_DIM, IMPACT_BASELINE};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Ambient grid temperature range (°C).
const AMBIENT_TEMP: (f64, f64) = (22.0, 26.0);

/// Hotspot boost added to a 2x2 block when a body is present (°C).
const HOTSPOT_BOOST: (f64, f64) = (10.0, 15.0);

/// Probability that a body is present on a normal tick.
const PRESENCE_PROBABILITY: f64 = 0.7;

/// Standard deviation of the vibration reading around the baseline.
const IMPACT_NOISE_STD: f64 = 600.0;

/// Synthetic frame generator.
pub struct FrameSimulator {
    rng: StdRng,
    impact_noise: Normal<f64>,
    forced: Option<OverrideKind>,
}

impl FrameSimulator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rng: StdRng::from_entropy(),
            impact_noise: Normal::new(IMPACT_BASELINE, IMPACT_NOISE_STD)?,
            forced: None,
        })
    }

    /// Seeded constructor for reproducible tests.
    pub fn with_seed(seed: u64) -> Result<Self> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            impact_noise: Normal::new(IMPACT_BASELINE, IMPACT_NOISE_STD)?,
            forced: None,
        })
    }

    /// Force the next frame to a demo scenario. One-shot: the scenario is
    /// consumed by the next [`next_frame`](Self::next_frame) call.
    pub fn force_scenario(&mut self, kind: OverrideKind) {
        self.forced = Some(kind);
    }

    /// Generate the next frame.
    pub fn next_frame(&mut self, now: DateTime<Utc>) -> SensorFrame {
        let (grid, impact) = match self.forced.take() {
            Some(OverrideKind::Impact) => {
                // Very hot scene, wall-breach level shock.
                let grid = self.uniform_grid(35.0, 38.0);
                let impact = self.rng.gen_range(26_000.0..30_000.0);
                (grid, impact)
            }
            Some(OverrideKind::Fall) => {
                let grid = self.uniform_grid(32.0, 34.0);
                let impact = self.rng.gen_range(18_000.0..21_000.0);
                (grid, impact)
            }
            None => {
                let mut grid = self.uniform_grid(AMBIENT_TEMP.0, AMBIENT_TEMP.1);
                if self.rng.gen_bool(PRESENCE_PROBABILITY) {
                    // 2x2 hotspot at a random interior cell.
                    let row = self.rng.gen_range(1..GRID_DIM - 2);
                    let col = self.rng.gen_range(1..GRID_DIM - 2);
                    let boost = self.rng.gen_range(HOTSPOT_BOOST.0..HOTSPOT_BOOST.1);
                    for r in row..row + 2 {
                        for c in col..col + 2 {
                            grid[r][c] += boost;
                        }
                    }
                }
                let impact = self.impact_noise.sample(&mut self.rng);
                (grid, impact)
            }
        };

        let detected = grid
            .iter()
            .flatten()
            .any(|&temp| temp > DETECTION_TEMP);

        SensorFrame {
            grid,
            impact,
            detected,
            timestamp: now,
        }
    }

    fn uniform_grid(&mut self, lo: f64, hi: f64) -> ThermalGrid {
        let mut grid = [[0.0; GRID_DIM]; GRID_DIM];
        for row in &mut grid {
            for cell in row.iter_mut() {
                *cell = self.rng.gen_range(lo..hi);
            }
        }
        grid
    }
}
