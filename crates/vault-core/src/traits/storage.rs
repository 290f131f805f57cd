//! Blob store trait for pluggable file byte storage.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file byte storage backends, addressed by filename.
///
/// Filenames map 1:1 to keys; the store never interprets contents.
/// Implementations live in `vault-storage` (local filesystem and
/// in-memory). All failures surface as `ErrorKind::BlobIo`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write the full contents for `key`, replacing any existing bytes.
    async fn write_bytes(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Read the full contents for `key`. Returns `None` if absent.
    async fn read_bytes(&self, key: &str) -> AppResult<Option<Bytes>>;

    /// Check whether bytes exist for `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Remove the bytes for `key`. Returns `false` if nothing was stored.
    async fn remove_bytes(&self, key: &str) -> AppResult<bool>;
}
