//! # vault-storage
//!
//! Blob store implementations for FileVault. File bytes are addressed by
//! filename; metadata lives in `vault-database`.

pub mod mime;
pub mod providers;

use std::sync::Arc;

use vault_core::config::{StorageConfig, StorageProviderKind};
use vault_core::result::AppResult;
use vault_core::traits::BlobStore;

pub use providers::{LocalBlobStore, MemoryBlobStore};

/// Build the blob store selected by configuration.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.provider {
        StorageProviderKind::Local => Arc::new(LocalBlobStore::new(&config.root_path).await?),
        StorageProviderKind::Memory => Arc::new(MemoryBlobStore::new()),
    };
    tracing::info!(provider = store.provider_type(), "Blob store ready");
    Ok(store)
}
