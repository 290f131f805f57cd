//! # vault-service
//!
//! Business logic for FileVault. Services follow constructor injection:
//! every store and collaborator is passed in as an `Arc` handle.
//!
//! - `gateway`: ownership checks and access logging around file operations
//! - `account`: registration and login
//! - `query`: question answering over a user's files

pub mod account;
pub mod gateway;
pub mod query;

pub use account::AccountService;
pub use gateway::{AccessGateway, Download};
pub use query::{OpenAiCompletionClient, QueryService, DocumentTextExtractor, build_completion_client};
