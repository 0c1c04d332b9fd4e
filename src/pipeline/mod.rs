//! Processing pipeline
//!
//! ```text
//! TICK: frame source → session.process_frame → publish to AppState
//!        ▲                                         │
//!        └── override / log-clear commands drained ┘
//! ```
//!
//! One tick loop per session, paced at a fixed interval; the API task only
//! reads (and queues commands into) the shared [`AppState`].

mod processing_loop;
mod source;
mod state;

pub use processing_loop::{LoopStats, ProcessingLoop};
pub use source::{FrameEvent, FrameSource, SimulatedSource, StdinSource};
pub use state::{AppState, OverrideRequest, SystemStatus};
