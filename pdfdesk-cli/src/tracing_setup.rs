//! Tracing setup for the pdfdesk CLI
//!
//! Usage:
//!   pdfdesk --debug ...              # Debug logging to console
//!   RUST_LOG=pdfdesk_server=debug    # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                         # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the filter to debug if RUST_LOG is unset)
    pub debug: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Initialize console tracing.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
