//! edf-processor - EDF metadata service
//!
//! Scans a configured directory for EDF recording files at startup,
//! keeps the decoded metadata in an in-memory snapshot, and serves it
//! over HTTP REST with on-demand rescans.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use edf_common::config::{resolve_source_dir, TomlConfig};
use edf_processor::services::{EdfParser, IngestService, RecordingQuery, SnapshotCache};
use edf_processor::AppState;

#[derive(Parser, Debug)]
#[command(name = "edf-processor", about = "EDF metadata scanning and query service")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the EDF recordings (overrides config)
    #[arg(long)]
    source_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Starting edf-processor (EDF metadata service)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = TomlConfig::load(args.config.as_deref())?;
    let source_dir = resolve_source_dir(args.source_dir.as_deref(), &config);
    info!("EDF source directory: {}", source_dir.display());

    let cache = Arc::new(SnapshotCache::new());
    let ingest = Arc::new(IngestService::new(
        source_dir,
        Arc::new(EdfParser::new()),
        cache.clone(),
    ));
    let query = Arc::new(RecordingQuery::new(cache));

    // Initial load; a missing source directory is fatal at startup.
    ingest.rescan()?;

    let state = AppState::new(ingest, query);
    let app = edf_processor::build_router(state, &config.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
