//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Realm advertised in `WWW-Authenticate` challenges.
    #[serde(default = "default_realm")]
    pub realm: String,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm: default_realm(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_realm() -> String {
    "FileVault".to_string()
}

fn default_password_min() -> usize {
    1
}
