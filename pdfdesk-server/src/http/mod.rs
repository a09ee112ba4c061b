//! HTTP layer
//!
//! Axum server with:
//! - Permissive CORS on every response
//! - Request tracing
//! - Graceful shutdown
//! - Plain-text error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig};
