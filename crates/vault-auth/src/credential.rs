//! Per-request credential verification.
//!
//! Every authenticated request carries a username and secret; there are
//! no sessions. [`CredentialVerifier`] is the single place that checks
//! them, shared by `/login` and the request extractor.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_database::IdentityStore;
use vault_entity::user::User;

use crate::password::CredentialHasher;

/// A username and plaintext secret supplied by a client.
#[derive(Clone)]
pub struct Credentials {
    /// Username.
    pub username: String,
    /// Plaintext secret.
    pub password: String,
}

impl Credentials {
    /// Bundle a username and secret.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Verifies credentials against the identity store.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    identity: Arc<dyn IdentityStore>,
    hasher: CredentialHasher,
}

impl CredentialVerifier {
    /// Create a verifier over `identity`.
    pub fn new(identity: Arc<dyn IdentityStore>) -> AppResult<Self> {
        Ok(Self {
            identity,
            hasher: CredentialHasher::new()?,
        })
    }

    /// The hasher used for verification, shared with registration.
    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// Returns `true` only if the user exists, has a well-formed stored
    /// hash, and the secret matches it.
    pub async fn verify_credential(&self, username: &str, secret: &str) -> AppResult<bool> {
        Ok(self.check(username, secret).await?.is_some())
    }

    /// Resolve the user for `credentials`, failing with
    /// `InvalidCredential` on any mismatch.
    pub async fn authenticate(&self, credentials: &Credentials) -> AppResult<User> {
        self.check(&credentials.username, &credentials.password)
            .await?
            .ok_or_else(AppError::invalid_credential)
    }

    async fn check(&self, username: &str, secret: &str) -> AppResult<Option<User>> {
        let user = self.identity.find_user(username).await?;
        let stored = user.as_ref().and_then(|u| u.password_hash.as_deref());
        let matched = self.hasher.verify(secret, stored).await?;

        match user {
            Some(user) if matched => Ok(Some(user)),
            _ => {
                debug!(username, "Credential rejected");
                Ok(None)
            }
        }
    }
}
