//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vault_core::types::UserId;

/// A user of the vault. Usernames are case-sensitive and never change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash. `None` for rows auto-provisioned by the
    /// access gateway; such users can never pass credential verification.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether a credential hash is stored for this user.
    pub fn has_credential(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password, if any.
    pub password_hash: Option<String>,
}

impl CreateUser {
    /// A registered user with a credential hash.
    pub fn with_credential(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: Some(password_hash.into()),
        }
    }

    /// An auto-provisioned user without a credential.
    pub fn provisioned(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioned_user_has_no_credential() {
        let data = CreateUser::provisioned("carol");
        let user = User {
            id: UserId::new(),
            username: data.username,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        assert!(!user.has_credential());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: UserId::new(),
            username: "alice".to_string(),
            password_hash: Some("$argon2id$secret".to_string()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
