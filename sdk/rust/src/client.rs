use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Filters for a quote request. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteParams {
    pub category: Option<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub total_categories: usize,
    pub categories: Vec<CategoryCount>,
    pub total_sentences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
    pub message: String,
}

pub struct HitokotoClient {
    client: Client,
    base_url: String,
}

impl HitokotoClient {
    /// `base_url` includes any route prefix, e.g. `http://host:3000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a random sentence. `Ok(None)` when nothing matches the filters.
    pub async fn quote(
        &self,
        params: &QuoteParams,
    ) -> Result<Option<serde_json::Value>, Box<dyn std::error::Error>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = &params.category {
            query.push(("c", category.clone()));
        }
        if let Some(min) = params.min {
            query.push(("min", min.to_string()));
        }
        if let Some(max) = params.max {
            query.push(("max", max.to_string()));
        }

        let resp = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(format!("Server returned error status {}: {}", status, text).into());
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub async fn status(&self) -> Result<StatusResponse, Box<dyn std::error::Error>> {
        self.get_json("/status").await
    }

    pub async fn ping(&self) -> Result<PingResponse, Box<dyn std::error::Error>> {
        self.get_json("/ping").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(format!("Server returned error status {}: {}", status, text).into());
        }
        Ok(serde_json::from_str(&text)?)
    }
}
