//! pdfdesk-server: persistence, object storage, and HTTP for pdfdesk
//!
//! Todos and PDFs live in PostgreSQL (or in memory); uploaded PDFs go to
//! S3. The router in [`http`] only talks to the repository and object-store
//! traits, so every backend combination serves the same API.

pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod storage;

pub use error::{Result, ServerError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
