//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, metrics)
//! - Cap in-flight requests at `listener.max_connections`
//! - Provide the dataset to handlers, loaded once or per request
//! - Bind server to listener and shut down gracefully

use axum::{body::Body, http::Request, middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{DatasetConfig, HitokotoConfig};
use crate::dataset::{self, Dataset, DatasetError};
use crate::http::handlers;
use crate::http::middleware::{cors, metrics::track_requests};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::lifecycle::{shutdown, startup};

/// Where handlers get their dataset from.
#[derive(Debug, Clone)]
enum DatasetSource {
    /// Loaded at startup, shared read-only.
    Resident(Arc<Dataset>),
    /// Reloaded from disk for every request.
    PerRequest,
}

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    source: DatasetSource,
    dataset_config: Arc<DatasetConfig>,
}

impl AppState {
    /// State serving a dataset loaded once.
    pub fn resident(dataset: Arc<Dataset>, dataset_config: DatasetConfig) -> Self {
        Self {
            source: DatasetSource::Resident(dataset),
            dataset_config: Arc::new(dataset_config),
        }
    }

    /// State that loads `dataset_config` on every request.
    pub fn per_request(dataset_config: DatasetConfig) -> Self {
        Self {
            source: DatasetSource::PerRequest,
            dataset_config: Arc::new(dataset_config),
        }
    }

    pub fn dataset_config(&self) -> &DatasetConfig {
        &self.dataset_config
    }

    /// The dataset this request should read.
    pub async fn dataset(&self) -> Result<Arc<Dataset>, DatasetError> {
        match &self.source {
            DatasetSource::Resident(dataset) => Ok(Arc::clone(dataset)),
            DatasetSource::PerRequest => {
                let config = Arc::clone(&self.dataset_config);
                tokio::task::spawn_blocking(move || {
                    dataset::load(&config.data_dir, &config.categories)
                })
                .await
                .map_err(|e| DatasetError::Task(e.to_string()))?
                .map(Arc::new)
            }
        }
    }
}

/// HTTP server for the hitokoto API.
pub struct HttpServer {
    router: Router,
    config: HitokotoConfig,
}

impl HttpServer {
    /// Create a server, loading the dataset now unless running per request.
    pub fn new(config: HitokotoConfig) -> Result<Self, DatasetError> {
        let state = match startup::initial_dataset(&config)? {
            Some(dataset) => AppState::resident(dataset, config.dataset.clone()),
            None => AppState::per_request(config.dataset.clone()),
        };
        Ok(Self::with_state(config, state))
    }

    /// Create a server around an already prepared state.
    pub fn with_state(config: HitokotoConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.config.mode,
            prefix = %self.config.route_prefix(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::triggered(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HitokotoConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
///
/// Unmatched paths fall through to the quote handler, so the quote endpoint
/// answers at the prefix root and anywhere else not claimed by a route.
///
/// Every clone of the returned router shares one concurrency limit; requests
/// beyond `listener.max_connections` wait for a slot instead of failing.
#[allow(deprecated)]
pub fn build_router(config: &HitokotoConfig, state: AppState) -> Router {
    let prefix = config.route_prefix();

    let routes = Router::new()
        .route(&format!("{prefix}/ping"), get(handlers::ping))
        .route(&format!("{prefix}/status"), get(handlers::status))
        .route(
            &format!("{prefix}/sentences/{{file}}"),
            get(handlers::raw_category),
        )
        .fallback(handlers::quote)
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )));

    cors::apply(routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
        .layer(GlobalConcurrencyLimitLayer::new(
            config.listener.max_connections,
        ))
}
