//! Registration policy for usernames and passwords.

use vault_core::config::AuthConfig;
use vault_core::error::AppError;

/// Longest accepted username, in bytes.
pub const MAX_USERNAME_BYTES: usize = 150;

/// Validates new credentials against configured policies.
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    /// Minimum password length in characters.
    min_password_length: usize,
}

impl CredentialPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_password_length: config.password_min_length,
        }
    }

    /// Validates a username and password for registration.
    ///
    /// Usernames are identity keys and travel inside Basic credentials, so
    /// they may not contain `:` or control characters.
    pub fn validate(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        if username.len() > MAX_USERNAME_BYTES {
            return Err(AppError::validation(format!(
                "Username must be at most {MAX_USERNAME_BYTES} bytes"
            )));
        }
        if username.contains(':') || username.chars().any(char::is_control) {
            return Err(AppError::validation(
                "Username must not contain ':' or control characters",
            ));
        }
        if password.chars().count() < self.min_password_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_password_length
            )));
        }
        Ok(())
    }
}
