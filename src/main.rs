//! Hitokoto API server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!   GET /?c=a&min=5   │                HITOKOTO API                   │
//!  ───────────────────┼─▶ http (cors, request id, trace, timeout)     │
//!                     │        │                                     │
//!                     │        ▼                                     │
//!                     │   handlers ──▶ selection ──▶ dataset         │
//!                     │        │        (filter +     (resident or   │
//!                     │        │         sample)       per request)  │
//!   JSON / JSONP      │        ▼                                     │
//!  ◀──────────────────┼── response                                   │
//!                     │                                              │
//!                     │  config · observability · lifecycle          │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hitokoto_api::config::{
    load_config, validate_config, ConfigError, DeploymentMode, HitokotoConfig,
};
use hitokoto_api::lifecycle::{signals, Shutdown};
use hitokoto_api::observability::{logging, metrics};
use hitokoto_api::HttpServer;

#[derive(Parser)]
#[command(name = "hitokoto-api")]
#[command(about = "Serve random hitokoto sentences over HTTP", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides config and PORT.
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding `<category>.json` files.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Load the dataset once (resident) or on every request (per-request).
    #[arg(short, long, value_enum)]
    mode: Option<DeploymentMode>,
}

impl Args {
    /// Defaults < config file < PORT < flags, validated at the end.
    fn into_config(self) -> Result<HitokotoConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => HitokotoConfig::default(),
        };
        config.apply_env();
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(data_dir) = self.data_dir {
            config.dataset.data_dir = data_dir;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;

    logging::init(&config.observability.log_level);
    tracing::info!("hitokoto-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mode = %config.mode,
        data_dir = %config.dataset.data_dir.display(),
        categories = config.dataset.categories.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
