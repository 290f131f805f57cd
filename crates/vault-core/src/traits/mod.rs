//! Collaborator traits defined in `vault-core` and implemented by other crates.

pub mod completion;
pub mod extract;
pub mod storage;

pub use completion::{ChatMessage, ChatRole, CompletionClient};
pub use extract::TextExtractor;
pub use storage::BlobStore;
