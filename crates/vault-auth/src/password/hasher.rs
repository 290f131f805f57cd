//! Argon2id hashing for stored credentials.
//!
//! Argon2 is slow on purpose, so every hash and verify runs on the
//! blocking pool instead of a runtime worker.

use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use tracing::warn;

use vault_core::error::AppError;
use vault_core::result::AppResult;

/// Checked in place of a missing hash so that unknown usernames cost the
/// same as wrong secrets.
pub(crate) const DUMMY_SECRET: &str = "filevault-timing-equaliser";

/// Hashes new secrets and checks presented ones against stored hashes.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    dummy_hash: Arc<str>,
}

impl CredentialHasher {
    /// Build a hasher, precomputing the dummy hash used for timing parity.
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            dummy_hash: hash_now(DUMMY_SECRET)?.into(),
        })
    }

    /// Produce a salted PHC string for `secret`.
    pub async fn hash(&self, secret: &str) -> AppResult<String> {
        let secret = secret.to_owned();
        blocking("hashing", move || hash_now(&secret)).await?
    }

    /// Whether `secret` matches `stored`.
    ///
    /// With no stored hash the dummy hash is checked and the answer is
    /// always `false`. A stored hash that cannot be parsed is a mismatch,
    /// never an error.
    pub async fn verify(&self, secret: &str, stored: Option<&str>) -> AppResult<bool> {
        let has_stored = stored.is_some();
        let phc = stored.map_or_else(|| self.dummy_hash.to_string(), str::to_owned);
        let secret = secret.to_owned();
        let matched = blocking("verification", move || verify_now(&secret, &phc)).await?;
        Ok(has_stored && matched)
    }
}

fn hash_now(secret: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| AppError::internal(format!("Credential hashing failed: {e}")))
}

fn verify_now(secret: &str, phc: &str) -> bool {
    let parsed = match PasswordHash::new(phc) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Stored credential hash is malformed; rejecting");
            return false;
        }
    };
    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => true,
        Err(password_hash::Error::Password) => false,
        Err(e) => {
            warn!(error = %e, algorithm = %parsed.algorithm, "Stored credential hash is unusable; rejecting");
            false
        }
    }
}

async fn blocking<T, F>(what: &'static str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Credential {what} aborted: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = CredentialHasher::new().unwrap();
        let phc = hasher.hash("s3cret").await.unwrap();
        assert!(phc.starts_with("$argon2id$"));
        assert!(hasher.verify("s3cret", Some(&phc)).await.unwrap());
        assert!(!hasher.verify("S3cret", Some(&phc)).await.unwrap());
    }

    #[tokio::test]
    async fn test_each_hash_gets_its_own_salt() {
        let hasher = CredentialHasher::new().unwrap();
        let a = hasher.hash("same").await.unwrap();
        let b = hasher.hash("same").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_garbage_hash_is_a_mismatch() {
        let hasher = CredentialHasher::new().unwrap();
        assert!(!hasher.verify("x", Some("not-a-phc-string")).await.unwrap());
        assert!(!hasher.verify("x", Some("$argon2id$v=19$broken")).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_hash_never_matches() {
        let hasher = CredentialHasher::new().unwrap();
        assert!(!hasher.verify(DUMMY_SECRET, None).await.unwrap());
        assert!(!hasher.verify("", None).await.unwrap());
    }
}
