//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the dataset once when running resident
//! - Report what was loaded, per category and in total
//!
//! # Design Decisions
//! - Fail fast: an unreachable data directory is fatal
//! - A resident server with zero loaded categories still starts, loudly

use std::sync::Arc;

use crate::config::{DeploymentMode, HitokotoConfig};
use crate::dataset::{self, Dataset, DatasetError};
use crate::observability::metrics;

/// Load the dataset the server should start with.
///
/// Returns `None` in per-request mode, where every request loads its own copy.
pub fn initial_dataset(config: &HitokotoConfig) -> Result<Option<Arc<Dataset>>, DatasetError> {
    if config.mode == DeploymentMode::PerRequest {
        tracing::info!(
            data_dir = %config.dataset.data_dir.display(),
            "Per-request mode: dataset is loaded on every request"
        );
        return Ok(None);
    }

    let dataset = dataset::load(&config.dataset.data_dir, &config.dataset.categories)?;
    if dataset.is_empty() {
        tracing::warn!(
            data_dir = %config.dataset.data_dir.display(),
            "No category could be loaded; every quote request will return 404"
        );
    }

    for (category, count) in dataset.counts() {
        tracing::info!(category = %category, count, "Serving category");
    }
    tracing::info!(
        categories = dataset.category_count(),
        configured = config.dataset.categories.len(),
        sentences = dataset.total_sentences(),
        "Dataset loaded"
    );
    metrics::record_dataset(&dataset);

    Ok(Some(Arc::new(dataset)))
}
