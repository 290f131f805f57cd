//! Access ledger repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use vault_core::result::AppResult;
use vault_core::types::{AccessLogId, UserId};
use vault_entity::access::{AccessLogEntry, NewAccessLogEntry};

use super::storage_error;
use crate::traits::AccessLedger;

/// PostgreSQL-backed access ledger. Only inserts and selects are issued;
/// the schema additionally rejects updates and deletes.
#[derive(Debug, Clone)]
pub struct AccessLogRepository {
    pool: PgPool,
}

impl AccessLogRepository {
    /// Create a new access log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLedger for AccessLogRepository {
    async fn append(&self, entry: &NewAccessLogEntry) -> AppResult<AccessLogEntry> {
        sqlx::query_as::<_, AccessLogEntry>(
            "INSERT INTO access_logs (id, user_id, file_id, filename, action, accessed_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(AccessLogId::new())
        .bind(entry.user_id)
        .bind(entry.file_id)
        .bind(&entry.filename)
        .bind(entry.action)
        .bind(entry.accessed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to append access log entry", e))
    }

    async fn entries_for_user(&self, user: UserId) -> AppResult<Vec<AccessLogEntry>> {
        sqlx::query_as::<_, AccessLogEntry>(
            "SELECT * FROM access_logs WHERE user_id = $1 ORDER BY accessed_at DESC, id DESC",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list access log entries", e))
    }
}
