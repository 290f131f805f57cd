//! Access ledger entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vault_core::types::{AccessLogId, FileId, UserId};

use super::action::AccessAction;

/// An immutable ledger entry recording one successful file action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AccessLogEntry {
    /// Unique entry identifier.
    pub id: AccessLogId,
    /// The user who performed the action.
    pub user_id: UserId,
    /// The file record acted upon. Not a foreign key: the record may since
    /// have been deleted.
    pub file_id: FileId,
    /// Filename at the time of the action.
    pub filename: String,
    /// The action performed.
    pub action: AccessAction,
    /// When the action completed.
    pub accessed_at: DateTime<Utc>,
}

/// Data required to append a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccessLogEntry {
    /// The acting user.
    pub user_id: UserId,
    /// The file record.
    pub file_id: FileId,
    /// Filename snapshot.
    pub filename: String,
    /// The action performed.
    pub action: AccessAction,
    /// When the action completed.
    pub accessed_at: DateTime<Utc>,
}
