//! Upload, download, list, and delete with ownership checks and audit.
//!
//! Each mutating or reading operation follows the same order: resolve the
//! actor, resolve the file record, perform the blob operation, then append
//! one ledger entry. The last two steps run on their own task, so a
//! caller that stops waiting cannot leave an effect without its entry.
//! A failed blob operation leaves no entry; anything that fails after the
//! blob operation is logged at `error!` with every identifying field and
//! reported as `StorageUnavailable`.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{error, info, warn};

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::traits::BlobStore;
use vault_database::{AccessLedger, FileRegistry, IdentityStore};
use vault_entity::access::{AccessAction, AccessLogEntry};
use vault_entity::file::{FileRecord, validate_filename};
use vault_entity::user::User;

/// File bytes returned by a download, with the record they belong to.
#[derive(Debug, Clone)]
pub struct Download {
    /// The owned record.
    pub file: FileRecord,
    /// Full contents.
    pub data: Bytes,
}

/// Façade over the identity store, file registry, ledger, and blob store.
#[derive(Debug, Clone)]
pub struct AccessGateway {
    identity: Arc<dyn IdentityStore>,
    registry: Arc<dyn FileRegistry>,
    ledger: Arc<dyn AccessLedger>,
    blobs: Arc<dyn BlobStore>,
}

impl AccessGateway {
    /// Creates a new access gateway.
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        registry: Arc<dyn FileRegistry>,
        ledger: Arc<dyn AccessLedger>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            identity,
            registry,
            ledger,
            blobs,
        }
    }

    /// Store `data` under `filename` for `username`.
    ///
    /// The first upload of a filename creates its record owned by the
    /// uploader. Later uploads reuse the record unchanged and overwrite the
    /// bytes, whoever the uploader is.
    pub async fn upload(&self, username: &str, filename: &str, data: Bytes) -> AppResult<FileRecord> {
        validate_filename(filename)?;
        let user = self.identity.get_or_create_user(username).await?;
        let file = self.registry.register_file(filename, user.id).await?;

        if !file.is_owned_by(user.id) {
            warn!(
                user_id = %user.id,
                username = %user.username,
                file_id = %file.id,
                owner_id = %file.owner_id,
                filename = %file.filename,
                "Upload overwrites a file owned by another user"
            );
        }

        let blobs = Arc::clone(&self.blobs);
        let ledger = Arc::clone(&self.ledger);
        settle(AccessAction::Upload, async move {
            let size = data.len();
            blobs.write_bytes(&file.filename, data).await?;
            audit(ledger.as_ref(), &user, &file, AccessAction::Upload).await?;

            info!(user_id = %user.id, file_id = %file.id, filename = %file.filename, size, "File uploaded");
            Ok(file)
        })
        .await
    }

    /// Return the contents of `filename` if `username` owns it.
    pub async fn download(&self, username: &str, filename: &str) -> AppResult<Download> {
        validate_filename(filename)?;
        let user = self.identity.get_or_create_user(username).await?;
        let file = self.owned_file(filename, &user).await?;

        let blobs = Arc::clone(&self.blobs);
        let ledger = Arc::clone(&self.ledger);
        settle(AccessAction::Download, async move {
            let data = blobs
                .read_bytes(&file.filename)
                .await?
                .ok_or_else(|| missing_bytes(&file))?;
            audit(ledger.as_ref(), &user, &file, AccessAction::Download).await?;

            info!(user_id = %user.id, file_id = %file.id, filename = %file.filename, "File downloaded");
            Ok(Download { file, data })
        })
        .await
    }

    /// Remove `filename` if `username` owns it: bytes first, then the
    /// record, then the ledger entry.
    ///
    /// Once the bytes are gone the delete is recorded even if the record
    /// cannot be removed; that case is logged for reconciliation and
    /// reported as `StorageUnavailable`.
    pub async fn delete(&self, username: &str, filename: &str) -> AppResult<FileRecord> {
        validate_filename(filename)?;
        let user = self.identity.get_or_create_user(username).await?;
        let file = self.owned_file(filename, &user).await?;

        let blobs = Arc::clone(&self.blobs);
        let registry = Arc::clone(&self.registry);
        let ledger = Arc::clone(&self.ledger);
        settle(AccessAction::Delete, async move {
            if !blobs.remove_bytes(&file.filename).await? {
                return Err(missing_bytes(&file));
            }

            if let Err(e) = registry.delete_file(&file.filename, user.id).await {
                error!(
                    user_id = %user.id,
                    username = %user.username,
                    file_id = %file.id,
                    filename = %file.filename,
                    action = %AccessAction::Delete,
                    error = %e,
                    "File bytes were removed but the record could not be deleted; manual reconciliation required"
                );
                audit(ledger.as_ref(), &user, &file, AccessAction::Delete).await?;
                return Err(AppError::with_source(
                    ErrorKind::StorageUnavailable,
                    format!("The bytes of '{}' were removed but its record remains", file.filename),
                    e,
                ));
            }
            audit(ledger.as_ref(), &user, &file, AccessAction::Delete).await?;

            info!(user_id = %user.id, file_id = %file.id, filename = %file.filename, "File deleted");
            Ok(file)
        })
        .await
    }

    /// The caller's records whose bytes are present, ordered by filename.
    ///
    /// Unknown users simply own nothing; listing does not provision rows.
    pub async fn list(&self, username: &str) -> AppResult<Vec<FileRecord>> {
        let Some(user) = self.identity.find_user(username).await? else {
            return Ok(Vec::new());
        };

        let mut present = Vec::new();
        for file in self.registry.list_files_for_owner(user.id).await? {
            if self.blobs.exists(&file.filename).await? {
                present.push(file);
            }
        }
        Ok(present)
    }

    /// The caller's ledger entries, newest first.
    pub async fn history(&self, username: &str) -> AppResult<Vec<AccessLogEntry>> {
        match self.identity.find_user(username).await? {
            Some(user) => self.ledger.entries_for_user(user.id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn owned_file(&self, filename: &str, user: &User) -> AppResult<FileRecord> {
        self.registry
            .find_file_for_owner(filename, user.id)
            .await?
            .ok_or_else(AppError::not_found_or_not_owned)
    }
}

/// Drive a blob effect and its ledger entry to completion on a spawned
/// task. Dropping the returned future detaches the task; it does not
/// cancel it.
async fn settle<T, F>(action: AccessAction, work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: Future<Output = AppResult<T>> + Send + 'static,
{
    tokio::spawn(work).await.map_err(|e| {
        error!(action = %action, error = %e, "File operation task did not complete");
        AppError::with_source(
            ErrorKind::Internal,
            format!("The {action} did not complete"),
            e,
        )
    })?
}

async fn audit(
    ledger: &dyn AccessLedger,
    user: &User,
    file: &FileRecord,
    action: AccessAction,
) -> AppResult<AccessLogEntry> {
    let at = Utc::now();
    ledger.record(user, file, action, at).await.map_err(|e| {
        error!(
            user_id = %user.id,
            username = %user.username,
            file_id = %file.id,
            filename = %file.filename,
            action = %action,
            accessed_at = %at,
            error = %e,
            "Access ledger append failed after the file operation completed; manual reconciliation required"
        );
        AppError::with_source(
            ErrorKind::StorageUnavailable,
            format!("The {action} of '{}' succeeded but could not be recorded", file.filename),
            e,
        )
    })
}

fn missing_bytes(file: &FileRecord) -> AppError {
    AppError::blob_io(format!("Stored bytes for '{}' are missing", file.filename))
}
