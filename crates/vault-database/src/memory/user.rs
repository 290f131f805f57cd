//! In-memory identity store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::UserId;
use vault_entity::user::{CreateUser, User};

use crate::traits::IdentityStore;

/// Identity store keyed by username.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    users: Arc<DashMap<String, User>>,
}

impl MemoryIdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are stored.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        match self.users.entry(data.username.clone()) {
            Entry::Occupied(_) => Err(AppError::duplicate_user(&data.username)),
            Entry::Vacant(slot) => {
                let user = User {
                    id: UserId::new(),
                    username: data.username.clone(),
                    password_hash: data.password_hash.clone(),
                    created_at: Utc::now(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_core::error::ErrorKind;

    #[tokio::test]
    async fn test_create_then_find() {
        let store = MemoryIdentityStore::new();
        let created = store
            .create_user(&CreateUser::with_credential("alice", "hash"))
            .await
            .unwrap();
        let found = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.find_user("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryIdentityStore::new();
        store
            .create_user(&CreateUser::with_credential("alice", "hash"))
            .await
            .unwrap();
        let err = store
            .create_user(&CreateUser::with_credential("alice", "other"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateUser);
    }

    #[tokio::test]
    async fn test_get_or_create_keeps_existing_credential() {
        let store = MemoryIdentityStore::new();
        let registered = store
            .create_user(&CreateUser::with_credential("alice", "hash"))
            .await
            .unwrap();
        let resolved = store.get_or_create_user("alice").await.unwrap();
        assert_eq!(resolved.id, registered.id);
        assert_eq!(resolved.password_hash.as_deref(), Some("hash"));
    }

    #[tokio::test]
    async fn test_get_or_create_provisions_without_credential() {
        let store = MemoryIdentityStore::new();
        let user = store.get_or_create_user("carol").await.unwrap();
        assert!(!user.has_credential());
        assert_eq!(store.len(), 1);
    }

    /// Hides the existing row from the first lookup, as if another request
    /// inserted it between our lookup and our insert.
    #[derive(Debug)]
    struct RacingStore {
        inner: MemoryIdentityStore,
        hidden_once: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl IdentityStore for RacingStore {
        async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
            if !self
                .hidden_once
                .swap(true, std::sync::atomic::Ordering::SeqCst)
            {
                return Ok(None);
            }
            self.inner.find_user(username).await
        }

        async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
            self.inner.create_user(data).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_get_or_create_resolves_lost_race_to_winner() {
        let inner = MemoryIdentityStore::new();
        let winner = inner
            .create_user(&CreateUser::with_credential("erin", "hash"))
            .await
            .unwrap();
        let store = RacingStore {
            inner,
            hidden_once: std::sync::atomic::AtomicBool::new(false),
        };

        let resolved = store.get_or_create_user("erin").await.unwrap();
        assert_eq!(resolved.id, winner.id);
        assert!(resolved.has_credential());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_or_create_yields_one_row() {
        let store = MemoryIdentityStore::new();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.get_or_create_user("dave").await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.len(), 1);
    }
}
