//! Backend selection for the three metadata stores.

use std::sync::Arc;

use tracing::info;

use vault_core::config::{DatabaseConfig, DatabaseProvider};
use vault_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryAccessLedger, MemoryFileRegistry, MemoryIdentityStore};
use crate::traits::{AccessLedger, FileRegistry, IdentityStore};

/// The identity store, file registry, and access ledger used by one
/// server instance, all backed by the same provider.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Users and credential hashes.
    pub identity: Arc<dyn IdentityStore>,
    /// File metadata.
    pub registry: Arc<dyn FileRegistry>,
    /// Append-only access log.
    pub ledger: Arc<dyn AccessLedger>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores for the configured provider.
    ///
    /// For PostgreSQL this opens the pool and, when enabled, applies
    /// pending migrations before returning.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => Ok(Self::postgres(DatabasePool::open(config).await?)),
            DatabaseProvider::Memory => {
                info!("Using in-memory metadata stores; data is lost on shutdown");
                Ok(Self::memory())
            }
        }
    }

    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        Self {
            identity: db.identity_store(),
            registry: db.file_registry(),
            ledger: db.access_ledger(),
            pool: Some(db),
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            identity: Arc::new(MemoryIdentityStore::new()),
            registry: Arc::new(MemoryFileRegistry::new()),
            ledger: Arc::new(MemoryAccessLedger::new()),
            pool: None,
        }
    }

    /// Check that the metadata backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.ping().await,
            None => self.identity.health_check().await,
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
