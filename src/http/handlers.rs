//! Route handlers: quote, status, ping, raw category files.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::dataset::Dataset;
use crate::http::query::QuoteParams;
use crate::http::response::{self, ApiError};
use crate::http::server::AppState;
use crate::selection;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub total_categories: usize,
    pub categories: Vec<CategoryCount>,
    pub total_sentences: usize,
}

impl StatusResponse {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let categories: Vec<CategoryCount> = dataset
            .counts()
            .into_iter()
            .map(|(id, count)| CategoryCount {
                category: id.to_string(),
                count,
            })
            .collect();
        Self {
            status: "ok",
            total_categories: categories.len(),
            total_sentences: categories.iter().map(|c| c.count).sum(),
            categories,
        }
    }
}

/// Liveness probe; never touches the dataset.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        message: "pong",
    })
}

pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    let dataset = state.dataset().await?;
    Ok(Json(StatusResponse::from_dataset(&dataset)))
}

/// Random sentence, filtered by `c`, `min` and `max`.
pub async fn quote(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ApiError::method_not_allowed());
    }

    let params = QuoteParams::from_query(&query);
    let dataset = state.dataset().await?;
    let selection = params.selection();

    let Some(record) = selection::select_random(&dataset, &selection) else {
        tracing::debug!(?selection, "No sentence matched");
        return Err(ApiError::no_match());
    };

    match params.jsonp_callback() {
        Some(callback) => response::jsonp(&callback, record),
        None => Ok(Json(record).into_response()),
    }
}

/// Raw `<category>.json` file from the data directory.
pub async fn raw_category(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let config = state.dataset_config();
    let Some(id) = file
        .strip_suffix(".json")
        .filter(|id| config.is_configured(id))
    else {
        return Err(ApiError::file_not_found());
    };

    let path = config.data_dir.join(format!("{id}.json"));
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            )],
            bytes,
        )
            .into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ApiError::file_not_found()),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read category file");
            Err(ApiError::internal("failed to read category file"))
        }
    }
}
