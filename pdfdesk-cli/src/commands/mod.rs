//! Command implementations for the pdfdesk CLI

pub mod config;
pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use pdfdesk_core::config::{DatabaseSettings, DatabaseSource};

pub use config::run_config;
pub use migrate::run_migrate;
pub use serve::run_serve;

/// Database target shared by `serve` and `migrate`.
///
/// An explicit `--database-url` wins; otherwise the cached process settings
/// decide, so both commands always resolve the same store.
pub(crate) fn database_settings(database_url: Option<String>) -> Result<DatabaseSettings> {
    if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
        return Ok(DatabaseSettings {
            url,
            source: DatabaseSource::Url,
        });
    }

    let settings = pdfdesk_core::config::settings()
        .context("Database is not configured. Set DATABASE_URL, or DATABASE_USER and DATABASE_NAME")?;
    Ok(settings.database.clone())
}
