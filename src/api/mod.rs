//! HTTP API layer.
//!
//! Thin axum handlers over `analysis::AnalysisEngine`. The router is
//! composable — `api_router()` returns a `Router` that can be mounted
//! on any axum server.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod router;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
