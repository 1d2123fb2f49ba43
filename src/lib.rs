//! Hitokoto API Library
//!
//! Random short quotations ("hitokoto") served over HTTP from categorized
//! JSON files, with optional category and length filtering.

pub mod config;
pub mod dataset;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod selection;

pub use config::HitokotoConfig;
pub use dataset::{Dataset, Hitokoto};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
