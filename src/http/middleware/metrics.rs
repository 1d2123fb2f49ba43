//! Per-request metrics.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

/// Record method, endpoint, status and latency of every request.
///
/// Requests without a matched route were served by the quote fallback.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "quote".to_string());

    let response = next.run(request).await;

    metrics::record_request(&method, &endpoint, response.status().as_u16(), start);
    response
}
