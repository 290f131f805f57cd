//! Prompt assembly over the caller's files.

use std::sync::Arc;

use tracing::{info, warn};

use vault_core::config::LlmConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::{BlobStore, ChatMessage, CompletionClient, TextExtractor};
use vault_database::{FileRegistry, IdentityStore};
use vault_entity::file::FileRecord;

const SYSTEM_PROMPT: &str = "You are a helpful assistant answering questions about the user's \
files. Base your answer on the provided documents. If they do not contain the answer, say so.";

/// A file whose text made it into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Document {
    filename: String,
    text: String,
}

/// Answers questions using the text of files the caller owns.
///
/// Reads performed here are not access-ledger events.
#[derive(Debug, Clone)]
pub struct QueryService {
    identity: Arc<dyn IdentityStore>,
    registry: Arc<dyn FileRegistry>,
    blobs: Arc<dyn BlobStore>,
    extractor: Arc<dyn TextExtractor>,
    completion: Arc<dyn CompletionClient>,
    max_context_chars: usize,
}

impl QueryService {
    /// Creates a new query service.
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        registry: Arc<dyn FileRegistry>,
        blobs: Arc<dyn BlobStore>,
        extractor: Arc<dyn TextExtractor>,
        completion: Arc<dyn CompletionClient>,
        config: &LlmConfig,
    ) -> Self {
        Self {
            identity,
            registry,
            blobs,
            extractor,
            completion,
            max_context_chars: config.max_context_chars,
        }
    }

    /// Answer `question` using the named files, or every listed file the
    /// caller owns when `files` is `None` or empty.
    ///
    /// Naming a file the caller does not own fails with
    /// `NotFoundOrNotOwned`, exactly as a download would.
    pub async fn ask(
        &self,
        username: &str,
        question: &str,
        files: Option<&[String]>,
    ) -> AppResult<String> {
        if question.trim().is_empty() {
            return Err(AppError::validation("Query must not be empty"));
        }

        let documents = match self.identity.find_user(username).await? {
            Some(user) => match files.filter(|f| !f.is_empty()) {
                Some(names) => {
                    let mut records = Vec::with_capacity(names.len());
                    for name in names {
                        let record = self
                            .registry
                            .find_file_for_owner(name, user.id)
                            .await?
                            .ok_or_else(AppError::not_found_or_not_owned)?;
                        records.push(record);
                    }
                    self.load_documents(records, true).await?
                }
                None => {
                    let records = self.registry.list_files_for_owner(user.id).await?;
                    self.load_documents(records, false).await?
                }
            },
            None => match files.filter(|f| !f.is_empty()) {
                Some(_) => return Err(AppError::not_found_or_not_owned()),
                None => Vec::new(),
            },
        };

        let messages = build_messages(question, &documents, self.max_context_chars);
        let answer = self.completion.complete(&messages).await?;

        info!(
            username,
            documents = documents.len(),
            answer_chars = answer.chars().count(),
            "Query answered"
        );
        Ok(answer)
    }

    /// Read and extract each record. With `required`, a record whose
    /// bytes are missing is an error; otherwise it is skipped like in a
    /// listing.
    async fn load_documents(
        &self,
        records: Vec<FileRecord>,
        required: bool,
    ) -> AppResult<Vec<Document>> {
        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            let Some(data) = self.blobs.read_bytes(&record.filename).await? else {
                if required {
                    return Err(AppError::blob_io(format!(
                        "Stored bytes for '{}' are missing",
                        record.filename
                    )));
                }
                continue;
            };

            let extractor = Arc::clone(&self.extractor);
            let filename = record.filename.clone();
            let size = data.len();
            let extracted =
                tokio::task::spawn_blocking(move || extractor.extract(&filename, &data))
                    .await
                    .map_err(|e| {
                        AppError::internal(format!(
                            "Text extraction for '{}' aborted: {e}",
                            record.filename
                        ))
                    })?;

            match extracted {
                Some(text) => documents.push(Document {
                    filename: record.filename,
                    text,
                }),
                None => warn!(
                    filename = %record.filename,
                    size,
                    "Skipping file with no extractable text"
                ),
            }
        }
        Ok(documents)
    }
}

/// Build the system and user messages, keeping at most `budget`
/// characters of document text.
fn build_messages(question: &str, documents: &[Document], budget: usize) -> Vec<ChatMessage> {
    let mut remaining = budget;
    let mut context = String::new();

    for doc in documents {
        if remaining == 0 {
            break;
        }
        let taken: String = doc.text.chars().take(remaining).collect();
        remaining -= taken.chars().count();
        context.push_str(&format!("--- {} ---\n{}\n\n", doc.filename, taken));
    }

    let user = if context.is_empty() {
        format!("No documents are available.\n\nQuestion: {question}")
    } else {
        format!("Documents:\n\n{context}Question: {question}")
    };

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}
