//! HTTP routing service for the gravelo route planner.

mod config;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gravelo_core::loading::{TileIndex, TileIndexConfig};

use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(about = "Gravel-cycling route planning API")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "gravelo.toml")]
    config: PathBuf,
    /// Override the listen address from the configuration file
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = config::load(&args.config)?;
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    info!("loading network tiles from {}", config.tiles_dir.display());
    let tiles = TileIndex::load(&TileIndexConfig {
        tiles_dir: config.tiles_dir.clone(),
    })?;

    let state = Arc::new(AppState {
        tiles,
        routing: config.routing,
    });

    let app = handlers::router(state);
    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("listening on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
