//! Axum server setup
//!
//! Router assembly with:
//! - Wildcard CORS (credentials disabled) as the outermost layer
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{InMemoryRepository, PdfRepository, TodoRepository};
use crate::error::Result;
use crate::storage::{MemoryObjectStore, ObjectStore};

/// Default cap on multipart upload bodies (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Largest accepted `POST /pdfs/upload` body
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoRepository>,
    pub pdfs: Arc<dyn PdfRepository>,
    pub objects: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn new(
        todos: Arc<dyn TodoRepository>,
        pdfs: Arc<dyn PdfRepository>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            todos,
            pdfs,
            objects,
        }
    }

    /// State backed entirely by in-process stores.
    pub fn in_memory(bucket: &str) -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        Self {
            todos: repo.clone(),
            pdfs: repo,
            objects: Arc::new(MemoryObjectStore::new(bucket)),
        }
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    // Wildcard origin; tower-http never sends Allow-Credentials unless asked
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::root::router())
        .merge(routes::todos::router())
        .merge(routes::pdfs::router(config.max_upload_bytes))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") })
        .method_not_allowed_fallback(|| async {
            (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
        })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<()> {
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
