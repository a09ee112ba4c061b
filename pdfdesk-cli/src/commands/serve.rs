//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use pdfdesk_core::ObjectStoreSettings;
use pdfdesk_server::db::{create_pool, migrations, PgRepository};
use pdfdesk_server::http::server::DEFAULT_MAX_UPLOAD_BYTES;
use pdfdesk_server::storage::{ObjectStore, S3ObjectStore, UnconfiguredObjectStore};
use pdfdesk_server::{run_server, AppState, ServerConfig};

use super::database_settings;

/// Bucket name rendered into upload URLs in `--in-memory` mode when
/// AWS_S3_BUCKET is unset.
const LOCAL_BUCKET: &str = "pdfdesk-local";

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "PDFDESK_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Keep todos, PDFs and uploads in memory (no database or S3 needed)
    #[arg(long)]
    pub in_memory: bool,

    /// Do not apply pending migrations at startup
    #[arg(long)]
    pub skip_migrations: bool,

    /// Database URL (overrides DATABASE_* variables)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Largest accepted upload body in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let state = if args.in_memory {
        in_memory_state()
    } else {
        postgres_state(&args).await?
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        max_upload_bytes: args.max_upload_bytes,
    };

    tracing::info!("Starting pdfdesk server on {}", args.bind);
    run_server(state, config).await.context("Server error")?;

    Ok(())
}

fn in_memory_state() -> AppState {
    let bucket = ObjectStoreSettings::from_env()
        .map(|s| s.bucket)
        .unwrap_or_else(|| LOCAL_BUCKET.to_string());
    tracing::warn!(bucket = %bucket, "In-memory mode: data is lost on shutdown");
    AppState::in_memory(&bucket)
}

async fn postgres_state(args: &ServeArgs) -> Result<AppState> {
    let database = database_settings(args.database_url.clone())?;
    tracing::info!(url = %database.redacted_url(), "Connecting to database");

    let pool = create_pool(&database.url)
        .await
        .context("Failed to create database pool")?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to apply migrations")?;
    }

    let objects: Arc<dyn ObjectStore> = match ObjectStoreSettings::from_env() {
        Some(settings) => Arc::new(S3ObjectStore::from_settings(&settings).await),
        None => {
            tracing::warn!("AWS_S3_BUCKET not set; uploads will fail");
            Arc::new(UnconfiguredObjectStore)
        }
    };

    let repo = Arc::new(PgRepository::new(pool));
    Ok(AppState::new(repo.clone(), repo, objects))
}
