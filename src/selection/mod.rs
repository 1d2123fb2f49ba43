//! Quote selection.
//!
//! # Data Flow
//! ```text
//! Dataset + SelectionQuery
//!     → candidate pool (one category, or all of them concatenated)
//!     → length filter (only when a bound is given)
//!     → uniform random pick, or None
//! ```
//!
//! # Design Decisions
//! - "No match" is a normal outcome, returned as `None`
//! - Bound presence, not value, decides whether filtering applies
//! - The RNG is injected so tests can seed it

pub mod selector;

pub use selector::{candidates, select, select_random, SelectionQuery};
