//! Text extraction trait used before forwarding file contents to the LLM.

/// Turns raw file bytes into prompt text.
///
/// Returns `None` when the format is not supported; callers skip such
/// files rather than failing the request.
pub trait TextExtractor: Send + Sync + std::fmt::Debug + 'static {
    /// Extract text from `data`, using `filename` as a format hint.
    fn extract(&self, filename: &str, data: &[u8]) -> Option<String>;
}
