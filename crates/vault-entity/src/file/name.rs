//! Filename validation.
//!
//! Filenames double as blob store keys, so anything that could escape the
//! storage root or alias another key is rejected up front.

use vault_core::error::AppError;

/// Longest accepted filename, in bytes.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Validate a filename for use as a registry key and blob key.
pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.is_empty() {
        return Err(AppError::validation("Filename cannot be empty"));
    }
    if filename.len() > MAX_FILENAME_BYTES {
        return Err(AppError::validation(format!(
            "Filename exceeds {MAX_FILENAME_BYTES} bytes"
        )));
    }
    if filename == "." || filename == ".." {
        return Err(AppError::validation("Filename cannot be '.' or '..'"));
    }
    if filename.chars().any(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(AppError::validation(
            "Filename cannot contain path separators or NUL",
        ));
    }
    Ok(())
}
