//! WALL-GUARD - Thermal/Vibration Perimeter Monitor
//!
//! Real-time simulated security-monitoring service: synthetic thermal +
//! vibration frames, scene classification, override policy, and a JSON
//! dashboard API.
//!
//! # Usage
//!
//! ```bash
//! # Run with the built-in simulator
//! cargo run --release
//!
//! # Replay captured frames from stdin (JSON, one frame per line)
//! cat frames.jsonl | ./wall-guard --stdin
//!
//! # Bounded demo run
//! ./wall-guard --ticks 500 --tick-ms 100
//! ```
//!
//! # Environment Variables
//!
//! - `WALL_GUARD_CONFIG`: path to an alternate TOML config file
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use wall_guard::api::{create_app, DashboardState};
use wall_guard::classifier::ClassifierHandle;
use wall_guard::config::GuardConfig;
use wall_guard::pipeline::{AppState, ProcessingLoop, SimulatedSource, StdinSource};
use wall_guard::session::GuardSession;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wall-guard")]
#[command(about = "Wall-Guard thermal/vibration perimeter monitor")]
#[command(version)]
struct CliArgs {
    /// Read sensor frames from stdin (JSON, one per line) instead of the
    /// built-in simulator
    #[arg(long)]
    stdin: bool,

    /// Override the server bind address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a TOML config file (overrides WALL_GUARD_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the tick interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Stop after N ticks (0 = run until shutdown)
    #[arg(long, default_value = "0")]
    ticks: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = GuardConfig::load(args.config.as_deref())?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  WALL-GUARD — node {} ({})", config.node.id, config.node.location);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let classifier = ClassifierHandle::from_config(config.classifier.model_path.as_deref());
    if !classifier.is_available() {
        warn!("Running in degraded mode: every tick will classify as NORMAL");
    }

    let app_state = Arc::new(RwLock::new(AppState::new(classifier.is_available())));
    let session = GuardSession::new(&config, classifier);

    let tick_interval = Duration::from_millis(args.tick_ms.unwrap_or(config.tick.interval_ms));
    let cancel_token = CancellationToken::new();

    // Tick loop task
    let processing = ProcessingLoop::new(
        session,
        Arc::clone(&app_state),
        cancel_token.clone(),
        tick_interval,
        args.ticks,
    );
    let use_stdin = args.stdin;
    let loop_token = cancel_token.clone();
    let loop_handle = tokio::spawn(async move {
        let stats = if use_stdin {
            let mut source = StdinSource::new();
            processing.run(&mut source).await
        } else {
            match SimulatedSource::new() {
                Ok(mut source) => processing.run(&mut source).await,
                Err(e) => {
                    warn!("Failed to start simulator: {}", e);
                    Default::default()
                }
            }
        };
        // A finished source (EOF or tick budget) also shuts the server down.
        loop_token.cancel();
        stats
    });

    // Dashboard API
    let dashboard_state = DashboardState {
        app_state,
        node_id: config.node.id.clone(),
        node_location: config.node.location.clone(),
    };
    let app = create_app(dashboard_state);

    let addr = args
        .addr
        .unwrap_or_else(|| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding dashboard server to {addr}"))?;
    info!("Dashboard API listening on http://{}", addr);

    // Ctrl-C cancels the shared token; the server and tick loop both
    // observe it.
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received — shutting down");
            signal_token.cancel();
        }
    });

    let server_token = cancel_token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { server_token.cancelled().await })
        .await
        .context("dashboard server error")?;

    match loop_handle.await {
        Ok(stats) => info!(
            ticks = stats.ticks_processed,
            rejected = stats.frames_rejected,
            "Shutdown complete"
        ),
        Err(e) => warn!("Tick loop task failed: {}", e),
    }

    Ok(())
}
