//! Rolling-average coordinate smoothing for the hot-spot marker.

use std::collections::VecDeque;

/// Low-pass filter over recently observed hot-spot coordinates.
///
/// A plain moving average is sufficient here: updates arrive at a fixed
/// tick rate and only cosmetic smoothness is required, not a
/// latency-sensitive control loop.
#[derive(Debug)]
pub struct CoordinateSmoother {
    window: usize,
    rows: VecDeque<f64>,
    cols: VecDeque<f64>,
}

impl CoordinateSmoother {
    /// Create a smoother averaging over the last `window` coordinate pairs.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            rows: VecDeque::with_capacity(window),
            cols: VecDeque::with_capacity(window),
        }
    }

    /// Append the current raw coordinates and return the running average.
    ///
    /// The first call returns the input itself (window of size 1). Oldest
    /// entries are evicted once the window is full.
    pub fn update(&mut self, row: f64, col: f64) -> (f64, f64) {
        self.rows.push_back(row);
        self.cols.push_back(col);
        if self.rows.len() > self.window {
            self.rows.pop_front();
            self.cols.pop_front();
        }

        let n = self.rows.len() as f64;
        let smooth_row = self.rows.iter().sum::<f64>() / n;
        let smooth_col = self.cols.iter().sum::<f64>() / n;
        (smooth_row, smooth_col)
    }
}
