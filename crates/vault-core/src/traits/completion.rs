//! Completion client trait for the external LLM service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions framing the conversation.
    System,
    /// The end user's turn.
    User,
    /// The model's turn.
    Assistant,
}

/// A single chat message sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Produces a textual answer for a list of chat messages.
///
/// Failures surface as `ErrorKind::ExternalService`.
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug + 'static {
    /// Request a completion and return the answer text.
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String>;
}
