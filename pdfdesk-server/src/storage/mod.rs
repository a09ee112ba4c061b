//! Object storage for uploaded PDFs
//!
//! [`ObjectStore`] is the seam between the upload handler and the backend:
//! [`S3ObjectStore`] talks to Amazon S3 (or an S3-compatible endpoint),
//! [`MemoryObjectStore`] keeps objects in process for tests and
//! `--in-memory` mode, and [`UnconfiguredObjectStore`] rejects every upload
//! when no bucket is configured.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

/// Object store failure
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("object store is not configured (set AWS_S3_BUCKET)")]
    NotConfigured,

    #[error("object store rejected credentials: {0}")]
    Credentials(String),

    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

impl ObjectStoreError {
    /// Whether the failure is a credentials problem as far as callers care.
    ///
    /// A missing configuration counts: there is nothing to authenticate with.
    pub fn is_credentials(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::Credentials(_))
    }
}

/// Binary object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` and return the public URL recorded for it.
    async fn put(&self, key: &str, body: Bytes) -> Result<String, ObjectStoreError>;
}

/// Object store used when no bucket is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredObjectStore;

#[async_trait]
impl ObjectStore for UnconfiguredObjectStore {
    async fn put(&self, key: &str, _body: Bytes) -> Result<String, ObjectStoreError> {
        tracing::warn!(key, "Upload attempted without an object store configured");
        Err(ObjectStoreError::NotConfigured)
    }
}
