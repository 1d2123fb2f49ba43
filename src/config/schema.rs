//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::dataset::{default_categories, CategoryId};

/// Route prefix used by the per-request shape when none is configured.
pub const PER_REQUEST_PREFIX: &str = "/api";

/// Root configuration for the hitokoto service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HitokotoConfig {
    /// How often the dataset is loaded.
    pub mode: DeploymentMode,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Sentence data location and category set.
    pub dataset: DatasetConfig,

    /// Route layout.
    pub routes: RoutesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl HitokotoConfig {
    /// Path prefix every route is mounted under.
    pub fn route_prefix(&self) -> &str {
        match (&self.routes.prefix, self.mode) {
            (Some(prefix), _) => prefix.as_str(),
            (None, DeploymentMode::Resident) => "",
            (None, DeploymentMode::PerRequest) => PER_REQUEST_PREFIX,
        }
    }

    /// Apply the `PORT` environment variable, if set.
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            self.apply_port(&port);
        }
    }

    /// Replace the port of `listener.bind_address`.
    ///
    /// Unparsable ports or bind addresses are left alone for validation to report.
    pub fn apply_port(&mut self, port: &str) {
        let Ok(port) = port.trim().parse::<u16>() else {
            tracing::warn!(port = %port, "Ignoring invalid PORT value");
            return;
        };
        if let Ok(mut addr) = self.listener.bind_address.parse::<SocketAddr>() {
            addr.set_port(port);
            self.listener.bind_address = addr.to_string();
        }
    }
}

/// Deployment shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Long-running server; dataset loaded once at startup.
    #[default]
    Resident,
    /// Function-style handler; dataset reloaded on every request.
    PerRequest,
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeploymentMode::Resident => f.write_str("resident"),
            DeploymentMode::PerRequest => f.write_str("per_request"),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum number of requests served at once; further requests wait.
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 10000,
        }
    }
}

/// Sentence dataset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding one `<category>.json` file per category.
    pub data_dir: PathBuf,

    /// Categories to load, in load order.
    pub categories: Vec<CategoryId>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("sentences"),
            categories: default_categories(),
        }
    }
}

impl DatasetConfig {
    pub fn is_configured(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.as_str() == id)
    }
}

/// Route layout configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Prefix for every route. Unset means "" when resident and "/api" per request.
    pub prefix: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
