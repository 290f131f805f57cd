//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// JSON alternative to Basic credentials for `/register` and `/login`.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Question for `/chatbot`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QueryRequest {
    /// The question.
    #[validate(length(min = 1, max = 4000, message = "Query must be 1-4000 characters"))]
    pub query: String,
    /// Files to draw from; every listed file when absent or empty.
    #[serde(default)]
    pub files: Option<Vec<String>>,
}
