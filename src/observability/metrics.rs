//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hitokoto_requests_total` (counter): requests by method, endpoint, status
//! - `hitokoto_request_duration_seconds` (histogram): latency distribution
//! - `hitokoto_dataset_sentences` (gauge): loaded sentences per category
//!
//! Recording is a no-op until a recorder is installed, so handlers record
//! unconditionally and only `init_metrics` depends on configuration.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::dataset::Dataset;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, endpoint: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("endpoint", endpoint.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("hitokoto_requests_total", &labels).increment(1);
    metrics::histogram!("hitokoto_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Publish per-category sentence counts.
pub fn record_dataset(dataset: &Dataset) {
    for (category, count) in dataset.counts() {
        metrics::gauge!("hitokoto_dataset_sentences", "category" => category.to_string())
            .set(count as f64);
    }
}
