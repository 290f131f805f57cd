//! In-memory file registry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::{FileId, UserId};
use vault_entity::file::FileRecord;

use crate::traits::FileRegistry;

/// File registry keyed by filename.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileRegistry {
    files: Arc<DashMap<String, FileRecord>>,
}

impl MemoryFileRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl FileRegistry for MemoryFileRegistry {
    async fn find_file(&self, filename: &str) -> AppResult<Option<FileRecord>> {
        Ok(self.files.get(filename).map(|f| f.value().clone()))
    }

    async fn insert_file(&self, filename: &str, owner: UserId) -> AppResult<FileRecord> {
        match self.files.entry(filename.to_string()) {
            Entry::Occupied(_) => Err(AppError::duplicate_file(filename)),
            Entry::Vacant(slot) => {
                let record = FileRecord {
                    id: FileId::new(),
                    filename: filename.to_string(),
                    owner_id: owner,
                    created_at: Utc::now(),
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_file_for_owner(
        &self,
        filename: &str,
        owner: UserId,
    ) -> AppResult<Option<FileRecord>> {
        Ok(self
            .files
            .get(filename)
            .filter(|f| f.owner_id == owner)
            .map(|f| f.value().clone()))
    }

    async fn list_files_for_owner(&self, owner: UserId) -> AppResult<Vec<FileRecord>> {
        let mut files: Vec<FileRecord> = self
            .files
            .iter()
            .filter(|f| f.owner_id == owner)
            .map(|f| f.value().clone())
            .collect();
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }

    async fn delete_file(&self, filename: &str, owner: UserId) -> AppResult<()> {
        self.files
            .remove_if(filename, |_, f| f.owner_id == owner)
            .map(|_| ())
            .ok_or_else(AppError::not_found_or_not_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_core::error::ErrorKind;

    #[tokio::test]
    async fn test_register_is_idempotent_and_keeps_first_owner() {
        let registry = MemoryFileRegistry::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let first = registry.register_file("notes.txt", alice).await.unwrap();
        let second = registry.register_file("notes.txt", bob).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.owner_id, alice);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate_rejected() {
        let registry = MemoryFileRegistry::new();
        registry.insert_file("a.txt", UserId::new()).await.unwrap();
        let err = registry
            .insert_file("a.txt", UserId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateFile);
    }

    #[tokio::test]
    async fn test_find_for_owner_requires_ownership() {
        let registry = MemoryFileRegistry::new();
        let alice = UserId::new();
        registry.register_file("a.txt", alice).await.unwrap();

        assert!(
            registry
                .find_file_for_owner("a.txt", alice)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            registry
                .find_file_for_owner("a.txt", UserId::new())
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            registry
                .find_file_for_owner("missing.txt", alice)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_sorted() {
        let registry = MemoryFileRegistry::new();
        let alice = UserId::new();
        let bob = UserId::new();
        registry.register_file("b.txt", alice).await.unwrap();
        registry.register_file("a.txt", alice).await.unwrap();
        registry.register_file("c.txt", bob).await.unwrap();

        let names: Vec<String> = registry
            .list_files_for_owner(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.filename)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_matches_missing() {
        let registry = MemoryFileRegistry::new();
        let alice = UserId::new();
        registry.register_file("a.txt", alice).await.unwrap();

        let not_owned = registry.delete_file("a.txt", UserId::new()).await.unwrap_err();
        let missing = registry.delete_file("zzz.txt", alice).await.unwrap_err();
        assert_eq!(not_owned.kind, ErrorKind::NotFoundOrNotOwned);
        assert_eq!(not_owned.kind, missing.kind);
        assert_eq!(not_owned.message, missing.message);

        registry.delete_file("a.txt", alice).await.unwrap();
        assert!(registry.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_register_yields_one_record() {
        let registry = MemoryFileRegistry::new();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.register_file("race.txt", UserId::new()).await })
            })
            .collect();

        let results = futures::future::join_all(handles).await;
        let first = results[0].as_ref().unwrap().as_ref().unwrap().clone();
        for result in results {
            assert_eq!(result.unwrap().unwrap(), first);
        }
        assert_eq!(registry.len(), 1);
    }
}
