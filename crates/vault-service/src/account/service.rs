//! Account operations built on the identity store and credential verifier.

use std::sync::Arc;

use tracing::info;

use vault_auth::{CredentialPolicy, CredentialVerifier, Credentials};
use vault_core::config::AuthConfig;
use vault_core::result::AppResult;
use vault_database::IdentityStore;
use vault_entity::user::{CreateUser, User};

/// Handles registration and login.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Identity store.
    identity: Arc<dyn IdentityStore>,
    /// Shared credential verifier.
    verifier: CredentialVerifier,
    /// Registration policy.
    policy: CredentialPolicy,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        verifier: CredentialVerifier,
        config: &AuthConfig,
    ) -> Self {
        Self {
            identity,
            verifier,
            policy: CredentialPolicy::new(config),
        }
    }

    /// Register a new user. Fails with `DuplicateUser` if the username is
    /// taken, including by an auto-provisioned row.
    pub async fn register(&self, credentials: &Credentials) -> AppResult<User> {
        self.policy
            .validate(&credentials.username, &credentials.password)?;

        let hash = self.verifier.hasher().hash(&credentials.password).await?;

        let user = self
            .identity
            .create_user(&CreateUser::with_credential(&credentials.username, hash))
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials without creating any session.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<User> {
        let user = self.verifier.authenticate(credentials).await?;
        info!(user_id = %user.id, username = %user.username, "Login verified");
        Ok(user)
    }

    /// The verifier shared with per-request authentication.
    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_core::error::ErrorKind;
    use vault_database::memory::MemoryIdentityStore;

    fn service() -> AccountService {
        let identity: Arc<dyn IdentityStore> = Arc::new(MemoryIdentityStore::new());
        let verifier = CredentialVerifier::new(identity.clone()).unwrap();
        AccountService::new(identity, verifier, &AuthConfig::default())
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let accounts = service();
        let creds = Credentials::new("alice", "s3cret");
        let registered = accounts.register(&creds).await.unwrap();
        assert!(registered.has_credential());

        let user = accounts.login(&creds).await.unwrap();
        assert_eq!(user.id, registered.id);

        let err = accounts
            .login(&Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredential);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let accounts = service();
        accounts
            .register(&Credentials::new("alice", "one"))
            .await
            .unwrap();
        let err = accounts
            .register(&Credentials::new("alice", "two"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateUser);

        assert!(
            accounts
                .verifier()
                .verify_credential("alice", "one")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_username() {
        let accounts = service();
        let err = accounts
            .register(&Credentials::new("a:b", "pw"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
