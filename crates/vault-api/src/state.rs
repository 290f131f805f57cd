//! Shared application state passed to all handlers via Axum's `State` extractor.

use std::sync::Arc;

use vault_auth::CredentialVerifier;
use vault_core::config::AppConfig;
use vault_core::result::AppResult;
use vault_core::traits::{BlobStore, CompletionClient};
use vault_database::Stores;
use vault_service::{AccessGateway, AccountService, QueryService, DocumentTextExtractor};

/// Application state, cloned cheaply into each handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Metadata stores.
    pub stores: Stores,
    /// File bytes.
    pub blobs: Arc<dyn BlobStore>,
    /// Per-request credential verification.
    pub verifier: CredentialVerifier,
    /// Registration and login.
    pub accounts: Arc<AccountService>,
    /// Ownership-checked, audited file access.
    pub gateway: Arc<AccessGateway>,
    /// Question answering.
    pub query: Arc<QueryService>,
}

impl AppState {
    /// Wire services on top of the given stores and collaborators.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        blobs: Arc<dyn BlobStore>,
        completion: Arc<dyn CompletionClient>,
    ) -> AppResult<Self> {
        let verifier = CredentialVerifier::new(stores.identity.clone())?;
        let accounts = AccountService::new(stores.identity.clone(), verifier.clone(), &config.auth);
        let gateway = AccessGateway::new(
            stores.identity.clone(),
            stores.registry.clone(),
            stores.ledger.clone(),
            blobs.clone(),
        );
        let query = QueryService::new(
            stores.identity.clone(),
            stores.registry.clone(),
            blobs.clone(),
            Arc::new(DocumentTextExtractor),
            completion,
            &config.llm,
        );

        Ok(Self {
            config: Arc::new(config),
            stores,
            blobs,
            verifier,
            accounts: Arc::new(accounts),
            gateway: Arc::new(gateway),
            query: Arc::new(query),
        })
    }
}
