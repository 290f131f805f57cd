//! Store traits for users, file records, and the access ledger.
//!
//! The get-or-create operations are provided methods built on
//! `find_*` + `create_*`: a create that loses a uniqueness race surfaces
//! as `DuplicateUser`/`DuplicateFile` and is resolved by fetching the
//! winning row. Implementations only need a unique constraint (or an
//! atomic map entry) for the guarantee to hold across processes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::UserId;
use vault_entity::access::{AccessAction, AccessLogEntry, NewAccessLogEntry};
use vault_entity::file::FileRecord;
use vault_entity::user::{CreateUser, User};

/// Persists users.
#[async_trait]
pub trait IdentityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by exact (case-sensitive) username.
    async fn find_user(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with `DuplicateUser` if the username exists.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Return the user named `username`, creating a credential-less row if
    /// none exists.
    async fn get_or_create_user(&self, username: &str) -> AppResult<User> {
        if let Some(user) = self.find_user(username).await? {
            return Ok(user);
        }

        match self.create_user(&CreateUser::provisioned(username)).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username, "Auto-provisioned user");
                Ok(user)
            }
            Err(e) if e.is(ErrorKind::DuplicateUser) => {
                tracing::debug!(username, "Lost user creation race, fetching winner");
                self.find_user(username).await?.ok_or_else(|| {
                    AppError::storage_unavailable(format!(
                        "User '{username}' reported as duplicate but not found"
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Persists file metadata. Filenames are unique across all owners.
#[async_trait]
pub trait FileRegistry: Send + Sync + std::fmt::Debug + 'static {
    /// Find a record by filename.
    async fn find_file(&self, filename: &str) -> AppResult<Option<FileRecord>>;

    /// Insert a new record. Fails with `DuplicateFile` if the filename exists.
    async fn insert_file(&self, filename: &str, owner: UserId) -> AppResult<FileRecord>;

    /// Find a record only if it exists and belongs to `owner`.
    async fn find_file_for_owner(
        &self,
        filename: &str,
        owner: UserId,
    ) -> AppResult<Option<FileRecord>>;

    /// List the records owned by `owner`, ordered by filename.
    async fn list_files_for_owner(&self, owner: UserId) -> AppResult<Vec<FileRecord>>;

    /// Remove the record. Fails with `NotFoundOrNotOwned` if no record with
    /// that filename belongs to `owner`.
    async fn delete_file(&self, filename: &str, owner: UserId) -> AppResult<()>;

    /// Return the record for `filename`, creating it owned by `owner` if
    /// none exists. An existing record is returned unchanged; its owner is
    /// never reassigned.
    async fn register_file(&self, filename: &str, owner: UserId) -> AppResult<FileRecord> {
        if let Some(file) = self.find_file(filename).await? {
            return Ok(file);
        }

        match self.insert_file(filename, owner).await {
            Ok(file) => Ok(file),
            Err(e) if e.is(ErrorKind::DuplicateFile) => {
                tracing::debug!(filename, "Lost file registration race, fetching winner");
                self.find_file(filename).await?.ok_or_else(|| {
                    AppError::storage_unavailable(format!(
                        "File '{filename}' reported as duplicate but not found"
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Append-only log of successful file actions.
#[async_trait]
pub trait AccessLedger: Send + Sync + std::fmt::Debug + 'static {
    /// Append one immutable entry. Fails only with `StorageUnavailable`.
    async fn append(&self, entry: &NewAccessLogEntry) -> AppResult<AccessLogEntry>;

    /// Entries recorded for `user`, newest first.
    async fn entries_for_user(&self, user: UserId) -> AppResult<Vec<AccessLogEntry>>;

    /// Record `action` by `user` on `file` at `at`.
    async fn record(
        &self,
        user: &User,
        file: &FileRecord,
        action: AccessAction,
        at: DateTime<Utc>,
    ) -> AppResult<AccessLogEntry> {
        self.append(&NewAccessLogEntry {
            user_id: user.id,
            file_id: file.id,
            filename: file.filename.clone(),
            action,
            accessed_at: at,
        })
        .await
    }
}
