//! Question answering over a user's stored files.

pub mod extract;
pub mod llm;
pub mod service;

pub use extract::DocumentTextExtractor;
pub use llm::{OpenAiCompletionClient, build_completion_client};
pub use service::QueryService;
