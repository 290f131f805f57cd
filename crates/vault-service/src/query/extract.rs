//! Text extraction for plain-text and PDF files.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, warn};

use vault_core::traits::TextExtractor;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Pulls the text layer out of PDFs and accepts any other file whose bytes
/// are valid UTF-8. Images, archives, and PDFs without a text layer are
/// reported as unsupported.
///
/// PDF parsing is CPU-bound; call it off the async runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, filename: &str, data: &[u8]) -> Option<String> {
        if is_pdf(filename, data) {
            return extract_pdf(filename, data);
        }
        let text = std::str::from_utf8(data).ok()?;
        if text.contains('\0') {
            return None;
        }
        Some(text.trim_start_matches('\u{feff}').to_string())
    }
}

fn is_pdf(filename: &str, data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
        || filename
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

fn extract_pdf(filename: &str, data: &[u8]) -> Option<String> {
    // The parser panics on some malformed inputs.
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(data))) {
        Ok(Ok(text)) => {
            let text = text.trim();
            if text.is_empty() {
                debug!(filename, "PDF has no text layer");
                return None;
            }
            Some(text.to_string())
        }
        Ok(Err(e)) => {
            warn!(filename, error = %e, "PDF text extraction failed");
            None
        }
        Err(_) => {
            warn!(filename, "PDF parser panicked");
            None
        }
    }
}
