//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::traits::BlobStore;

/// Stores each blob as one file directly under `root`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at the given path, creating the directory if
    /// needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::BlobIo,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a key to its path. Keys are validated filenames, so they
    /// never contain separators.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\', '\0']) {
            return Err(AppError::blob_io(format!("Invalid blob key: {key:?}")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    /// Writes land in a hidden partial file first and are renamed over the
    /// key, so a reader never sees a half-written or truncated blob.
    async fn write_bytes(&self, key: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        let partial = self.root.join(format!(".upload-{}.partial", Uuid::new_v4()));

        if let Err(e) = write_then_rename(&partial, &full_path, &data).await {
            if let Err(cleanup) = fs::remove_file(&partial).await
                && cleanup.kind() != std::io::ErrorKind::NotFound
            {
                warn!(key, partial = %partial.display(), error = %cleanup, "Failed to remove partial upload");
            }
            return Err(AppError::with_source(
                ErrorKind::BlobIo,
                format!("Failed to write file: {key}"),
                e,
            ));
        }

        debug!(key, bytes = data.len(), "Wrote blob");
        Ok(())
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Option<Bytes>> {
        let full_path = self.resolve(key)?;
        match fs::read(&full_path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::BlobIo,
                format!("Failed to read file: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::BlobIo, format!("Failed to stat file: {key}"), e)
        })
    }

    async fn remove_bytes(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(key, "Removed blob");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::BlobIo,
                format!("Failed to delete file: {key}"),
                e,
            )),
        }
    }
}

async fn write_then_rename(partial: &Path, target: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(partial)
        .await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(partial, target).await
}
