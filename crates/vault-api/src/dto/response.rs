//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vault_core::types::FileId;
use vault_entity::access::{AccessAction, AccessLogEntry};

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

/// Result of an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Stored filename.
    pub filename: String,
}

/// The caller's files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    /// Filenames, sorted.
    pub files: Vec<String>,
}

/// Result of a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Confirmation text.
    pub detail: String,
}

/// Answer from `/chatbot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Model answer.
    pub response: String,
}

/// One ledger entry as exposed by `/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// File identifier at the time of access.
    pub file_id: FileId,
    /// Filename at the time of access.
    pub filename: String,
    /// What happened.
    pub action: AccessAction,
    /// When it happened.
    pub accessed_at: DateTime<Utc>,
}

impl From<AccessLogEntry> for HistoryEntry {
    fn from(entry: AccessLogEntry) -> Self {
        Self {
            file_id: entry.file_id,
            filename: entry.filename,
            action: entry.action,
            accessed_at: entry.accessed_at,
        }
    }
}

/// The caller's access history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Entries.
    pub entries: Vec<HistoryEntry>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Metadata store reachable.
    pub database: bool,
    /// Blob store reachable.
    pub storage: bool,
}
