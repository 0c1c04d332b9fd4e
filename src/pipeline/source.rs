//! Frame source abstraction for sensor ingestion.
//!
//! Unified trait for producing sensor frames from different sources: the
//! built-in simulator and JSON-per-line stdin (for replaying captured
//! scenarios). Pacing is owned by the processing loop, not the source.

use crate::engine::OverrideKind;
use crate::simulator::FrameSimulator;
use crate::types::SensorFrame;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

/// Events produced by a frame source.
pub enum FrameEvent {
    /// A valid sensor frame was produced.
    Frame(SensorFrame),
    /// Source reached end of data (EOF for stdin; simulator never ends).
    Eof,
}

/// Trait abstracting where sensor frames come from.
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Produce the next frame.
    async fn next_frame(&mut self) -> Result<FrameEvent>;

    /// Human-readable name for logging (e.g. "simulator", "stdin").
    fn source_name(&self) -> &str;

    /// Force the next frame to a demo scenario, if the source supports it.
    ///
    /// Default is a no-op — replay sources carry their own data and only
    /// the override lock applies.
    fn force_scenario(&mut self, _kind: OverrideKind) {}
}

// ============================================================================
// Simulated Source
// ============================================================================

/// Unbounded synthetic frames from the built-in simulator.
pub struct SimulatedSource {
    simulator: FrameSimulator,
}

impl SimulatedSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            simulator: FrameSimulator::new()?,
        })
    }
}

#[async_trait]
impl FrameSource for SimulatedSource {
    async fn next_frame(&mut self) -> Result<FrameEvent> {
        Ok(FrameEvent::Frame(self.simulator.next_frame(Utc::now())))
    }

    fn source_name(&self) -> &str {
        "simulator"
    }

    fn force_scenario(&mut self, kind: OverrideKind) {
        self.simulator.force_scenario(kind);
    }
}

// ============================================================================
// Stdin Source (JSON frames, one per line)
// ============================================================================

/// Reads JSON-formatted sensor frames from stdin.
pub struct StdinSource {
    reader: tokio::io::BufReader<tokio::io::Stdin>,
    line_buffer: String,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: tokio::io::BufReader::new(tokio::io::stdin()),
            line_buffer: String::with_capacity(2048),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for StdinSource {
    async fn next_frame(&mut self) -> Result<FrameEvent> {
        use tokio::io::AsyncBufReadExt;
        loop {
            self.line_buffer.clear();
            let bytes = self.reader.read_line(&mut self.line_buffer).await?;
            if bytes == 0 {
                return Ok(FrameEvent::Eof);
            }
            let line = self.line_buffer.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<SensorFrame>(line) {
                Ok(frame) => return Ok(FrameEvent::Frame(frame)),
                Err(e) => {
                    tracing::warn!("[StdinSource] Failed to parse frame: {}", e);
                    // Skip malformed lines and keep reading
                }
            }
        }
    }

    fn source_name(&self) -> &str {
        "stdin"
    }
}
