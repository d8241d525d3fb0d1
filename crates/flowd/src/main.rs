//! flowd - figma-flow server daemon
//!
//! Serves the greeting, test, echo and image upload endpoints.
//!
//! Usage:
//!   flowd [OPTIONS] [config.toml]
//!
//! If no config file is provided, listens on 127.0.0.1:5000 and stores
//! uploads in `./uploads`.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use flow_api::{create_router, AppState};
use flow_core::LocalImageStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::FlowdConfig;

/// Parsed command-line arguments
#[derive(Parser, Debug)]
#[command(name = "flowd")]
#[command(author, version, about = "figma-flow server daemon")]
struct Args {
    /// Server config file (TOML)
    config: Option<PathBuf>,

    /// Interface or hostname to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory uploaded images are stored in (overrides config)
    #[arg(short = 'd', long)]
    upload_dir: Option<PathBuf>,

    /// Largest accepted upload body in bytes (overrides config)
    #[arg(long)]
    max_upload_bytes: Option<usize>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Load the config file (if any) and apply command-line overrides
    fn resolve_config(&self) -> anyhow::Result<FlowdConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading config from: {}", path.display());
                FlowdConfig::load(path)?
            }
            None => {
                tracing::info!("No config file provided, using defaults");
                FlowdConfig::default()
            }
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.upload_dir {
            config.uploads.dir = dir.clone();
        }
        if let Some(max) = self.max_upload_bytes {
            config.uploads.max_upload_bytes = max;
        }

        Ok(config)
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "flowd=info,flow_api=info,flow_core=info,tower_http=info".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs);

    tracing::info!("Starting flowd (figma-flow server)");

    let config = args.resolve_config()?;

    // The upload directory must exist before the first request
    let store = LocalImageStore::open(&config.uploads.dir)
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory: {}",
                config.uploads.dir.display()
            )
        })?;
    tracing::info!(
        dir = %store.dir().display(),
        max_upload_bytes = config.uploads.max_upload_bytes,
        "Upload directory ready"
    );

    let state =
        AppState::new(Arc::new(store)).with_max_upload_bytes(config.uploads.max_upload_bytes);
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
            .await
            .with_context(|| {
                format!(
                    "Failed to bind {}:{}",
                    config.server.host, config.server.port
                )
            })?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("flowd stopped");
    Ok(())
}
