//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::UserId;
use vault_entity::user::{CreateUser, User};

use super::{is_unique_violation, storage_error};
use crate::traits::IdentityStore;

/// PostgreSQL-backed identity store.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user by username", e))
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(&data.username)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::duplicate_user(&data.username)
            } else {
                storage_error("Failed to create user", e)
            }
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| storage_error("Health check failed", e))
    }
}
