//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → middleware/cors.rs (preflight short-circuit, CORS headers)
//!     → handlers.rs (ping / status / raw file / quote fallback)
//!     → query.rs (lenient parameter parsing) → selection
//!     → response.rs (JSON, JSONP, error bodies)
//! ```

pub mod handlers;
pub mod middleware;
pub mod query;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
