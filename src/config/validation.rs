//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts and connection limit > 0, addresses parse)
//! - Reject category ids that cannot name a file safely
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HitokotoConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::HitokotoConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    ZeroConnections,

    #[error("dataset.data_dir must not be empty")]
    EmptyDataDir,

    #[error("dataset.categories must not be empty")]
    NoCategories,

    #[error("category id '{0}' must be non-empty and use only [A-Za-z0-9_-]")]
    InvalidCategory(String),

    #[error("category id '{0}' is listed more than once")]
    DuplicateCategory(String),

    #[error("routes.prefix '{0}' must start with '/' and not end with '/'")]
    InvalidPrefix(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check every semantic rule, collecting all failures.
pub fn validate_config(config: &HitokotoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroConnections);
    }

    if config.dataset.data_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyDataDir);
    }

    if config.dataset.categories.is_empty() {
        errors.push(ValidationError::NoCategories);
    }

    let mut seen = HashSet::new();
    for id in &config.dataset.categories {
        if !id.is_valid() {
            errors.push(ValidationError::InvalidCategory(id.to_string()));
        } else if !seen.insert(id.as_str()) {
            errors.push(ValidationError::DuplicateCategory(id.to_string()));
        }
    }

    if let Some(prefix) = &config.routes.prefix {
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            errors.push(ValidationError::InvalidPrefix(prefix.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CategoryId;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&HitokotoConfig::default()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = HitokotoConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.listener.max_connections = 0;
        config.dataset.categories = vec![
            CategoryId::from("a"),
            CategoryId::from("a"),
            CategoryId::from("../x"),
        ];
        config.routes.prefix = Some("api/".into());
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("nowhere".into()),
                ValidationError::ZeroConnections,
                ValidationError::DuplicateCategory("a".into()),
                ValidationError::InvalidCategory("../x".into()),
                ValidationError::InvalidPrefix("api/".into()),
                ValidationError::ZeroTimeout,
            ]
        );
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let mut config = HitokotoConfig::default();
        config.dataset.categories.clear();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::NoCategories])
        );
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = HitokotoConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("bad".into())])
        );
    }
}
