//! Temporal and spatial feature extraction
//!
//! Leaf components of the per-tick pipeline:
//! - [`CoordinateSmoother`]: rolling-average low-pass filter for the
//!   displayed hot-spot marker position
//! - [`MultiScaleBuffer`]: two-horizon rolling windows deriving peak impact
//!   and a loitering ratio
//! - [`heat_center`]: pure argmax over the thermal grid

mod heat_center;
mod multiscale;
mod smoother;

pub use heat_center::heat_center;
pub use multiscale::{MultiScaleBuffer, TemporalFeatures};
pub use smoother::CoordinateSmoother;
