//! Sentence dataset subsystem.
//!
//! # Data Flow
//! ```text
//! <data_dir>/<category>.json  (one JSON array per category)
//!     → loader.rs (read + parse, skip broken categories)
//!     → store.rs (Dataset: ordered category → records)
//!     → shared read-only with the selector and handlers
//! ```
//!
//! # Design Decisions
//! - A broken category file is a warning, not a startup failure
//! - An unreachable data directory is fatal
//! - Records keep every source field verbatim; only the text is interpreted

pub mod loader;
pub mod record;
pub mod store;

pub use loader::{load, DatasetError};
pub use record::{default_categories, CategoryId, Hitokoto, TEXT_FIELD};
pub use store::Dataset;
