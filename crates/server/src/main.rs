//! Locker server - tenant-scoped file storage over HTTP
//!
//! Serves the storage API, the gallery convenience endpoints and the
//! embedded browser UI from a single listener.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use server::{http, ServerConfig, ServiceState};

/// Locker server - tenant-scoped file storage over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Base storage directory (overrides the config file)
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let log_level: tracing::Level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stdout_layer).init();

    tracing::info!("Starting Locker server");

    // Load configuration and apply CLI overrides
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(storage_dir) = args.storage_dir {
        config.storage.base_path = storage_dir;
    }

    let listen_addr = match args.port {
        Some(port) => SocketAddr::from_str(&format!("0.0.0.0:{}", port))?,
        None => SocketAddr::from_str(&config.listen_addr)?,
    };

    if !config.cors.is_configured() {
        tracing::warn!("CORS origins are not configured. Cross-origin requests will be blocked.");
    }

    let state = ServiceState::new(config);

    // Set up graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let graceful_shutdown = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");
        tracing::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
    };
    tokio::spawn(graceful_shutdown);

    http::run(state, listen_addr, shutdown_rx).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
