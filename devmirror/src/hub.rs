//! devmirror-hub - orchestration hub service
//!
//! Accepts `POST /analyze`, calls the code and pattern engines, stores the
//! combined result in the history database, and returns it.

use anyhow::{Context, Result};
use clap::Parser;
use devmirror::{hub_service, server};
use devmirror_core::{Config, Database, Hub};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "devmirror-hub")]
#[command(about = "Run the DevMirror orchestration hub")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides [hub].port)
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
        config.hub.port = port;
    }

    let _log_guard = devmirror_core::logging::init(&config.logging, true)
        .context("failed to initialize logging")?;

    // Open database
    let db_path = Config::database_path();
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;

    let hub = Hub::new(&config, Arc::new(db)).context("failed to create engine clients")?;

    let addr = config.hub.bind_addr().await?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        database = %db_path.display(),
        code_engine = %config.code_engine.url,
        pattern_engine = %config.pattern_engine.url,
        "Hub listening"
    );

    server::serve(listener, hub_service::router(Arc::new(hub)))
        .await
        .context("hub server failed")?;

    Ok(())
}
