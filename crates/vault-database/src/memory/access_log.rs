//! In-memory access ledger.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use vault_core::result::AppResult;
use vault_core::types::{AccessLogId, UserId};
use vault_entity::access::{AccessLogEntry, NewAccessLogEntry};

use crate::traits::AccessLedger;

/// Append-only vector of ledger entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccessLedger {
    entries: Arc<RwLock<Vec<AccessLogEntry>>>,
}

impl MemoryAccessLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry in append order.
    pub async fn entries(&self) -> Vec<AccessLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AccessLedger for MemoryAccessLedger {
    async fn append(&self, entry: &NewAccessLogEntry) -> AppResult<AccessLogEntry> {
        let stored = AccessLogEntry {
            id: AccessLogId::new(),
            user_id: entry.user_id,
            file_id: entry.file_id,
            filename: entry.filename.clone(),
            action: entry.action,
            accessed_at: entry.accessed_at,
        };
        self.entries.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn entries_for_user(&self, user: UserId) -> AppResult<Vec<AccessLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| e.user_id == user)
            .cloned()
            .collect())
    }
}
