/// Structured error types for pdfdesk-core.
///
/// The CLI wraps these in `anyhow` for reporting; the server matches on them.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// An env file exists but could not be parsed
    #[error("Failed to load env file {path:?}: {reason}")]
    EnvFile { path: PathBuf, reason: String },

    /// Configuration is incomplete or invalid
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for pdfdesk-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an env file error
    pub fn env_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::EnvFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
