//! devmirror-pattern - behavioral pattern engine service
//!
//! Exposes `POST /analyze_behavior` for the hub (or any other client).

use anyhow::{Context, Result};
use clap::Parser;
use devmirror::pattern_service::{self, PatternState};
use devmirror::server;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "devmirror-pattern")]
#[command(about = "Run the DevMirror behavioral pattern engine")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides [pattern].port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        devmirror::load_config(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.pattern.port = port;
    }

    let _log_guard = devmirror_core::logging::init(&config.logging, true)
        .context("failed to initialize logging")?;

    let addr = config.pattern.bind_addr().await?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        debug_loop_window = config.pattern.debug_loop_window,
        "Pattern engine listening"
    );

    let router = pattern_service::router(PatternState {
        debug_loop_window: config.pattern.debug_loop_window,
    });
    server::serve(listener, router)
        .await
        .context("pattern engine server failed")?;

    Ok(())
}
