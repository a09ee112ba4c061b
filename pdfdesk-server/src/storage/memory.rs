//! In-process object store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use pdfdesk_core::config::object_url;

use super::{ObjectStore, ObjectStoreError};

/// Object store that keeps uploads in memory.
///
/// URLs are rendered exactly as the S3 backend renders them, so rows
/// written in `--in-memory` mode look like production rows.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
    reject_credentials: bool,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::default(),
            reject_credentials: false,
        }
    }

    /// A store whose every upload fails as if the credentials were invalid.
    pub fn with_invalid_credentials(bucket: impl Into<String>) -> Self {
        Self {
            reject_credentials: true,
            ..Self::new(bucket)
        }
    }

    pub async fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, body: Bytes) -> Result<String, ObjectStoreError> {
        if self.reject_credentials {
            return Err(ObjectStoreError::Credentials(
                "InvalidAccessKeyId: the access key does not exist".to_string(),
            ));
        }
        self.objects.write().await.insert(key.to_string(), body);
        Ok(object_url(&self.bucket, key))
    }
}
