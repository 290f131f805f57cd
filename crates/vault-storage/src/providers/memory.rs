//! In-memory blob store.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use vault_core::result::AppResult;
use vault_core::traits::BlobStore;

/// Process-local blob store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<DashMap<String, Bytes>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn write_bytes(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.blobs.insert(key.to_string(), data);
        Ok(())
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Option<Bytes>> {
        Ok(self.blobs.get(key).map(|b| b.value().clone()))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.contains_key(key))
    }

    async fn remove_bytes(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.remove(key).is_some())
    }
}
