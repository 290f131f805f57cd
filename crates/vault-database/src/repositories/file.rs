//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_entity::file::FileRecord;

use super::{is_unique_violation, storage_error};
use crate::traits::FileRegistry;

/// PostgreSQL-backed file registry.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRegistry for FileRepository {
    async fn find_file(&self, filename: &str) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE filename = $1")
            .bind(filename)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find file", e))
    }

    async fn insert_file(&self, filename: &str, owner: UserId) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "INSERT INTO files (id, filename, owner_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(FileId::new())
        .bind(filename)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::duplicate_file(filename)
            } else {
                storage_error("Failed to create file record", e)
            }
        })
    }

    async fn find_file_for_owner(
        &self,
        filename: &str,
        owner: UserId,
    ) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files WHERE filename = $1 AND owner_id = $2",
        )
        .bind(filename)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find file for owner", e))
    }

    async fn list_files_for_owner(&self, owner: UserId) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files WHERE owner_id = $1 ORDER BY filename ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list files", e))
    }

    async fn delete_file(&self, filename: &str, owner: UserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM files WHERE filename = $1 AND owner_id = $2")
            .bind(filename)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete file record", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found_or_not_owned());
        }
        Ok(())
    }
}
