//! Unified application error types for FileVault.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Message shared by every credential failure so that callers cannot tell
/// an unknown username from a wrong secret.
pub const INVALID_CREDENTIAL_MESSAGE: &str = "Invalid username or password";

/// Message shared by every ownership failure so that callers cannot tell a
/// missing file from a file owned by someone else.
pub const NOT_FOUND_OR_NOT_OWNED_MESSAGE: &str = "File not found or not owned by user";

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The username is already registered.
    DuplicateUser,
    /// The filename is already registered. Raised by registry inserts that
    /// lose a race; the get-or-create path resolves it internally.
    DuplicateFile,
    /// Unknown username or wrong secret.
    InvalidCredential,
    /// The file does not exist, or exists but is owned by someone else.
    NotFoundOrNotOwned,
    /// The metadata or ledger store failed.
    StorageUnavailable,
    /// File bytes could not be read, written, or removed.
    BlobIo,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// An external service (LLM completion) failed.
    ExternalService,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateUser => write!(f, "DUPLICATE_USER"),
            Self::DuplicateFile => write!(f, "DUPLICATE_FILE"),
            Self::InvalidCredential => write!(f, "INVALID_CREDENTIAL"),
            Self::NotFoundOrNotOwned => write!(f, "NOT_FOUND_OR_NOT_OWNED"),
            Self::StorageUnavailable => write!(f, "STORAGE_UNAVAILABLE"),
            Self::BlobIo => write!(f, "BLOB_IO"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout FileVault.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a duplicate-user error.
    pub fn duplicate_user(username: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateUser,
            format!("Username '{username}' already exists"),
        )
    }

    /// Create a duplicate-file error.
    pub fn duplicate_file(filename: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateFile,
            format!("File '{filename}' is already registered"),
        )
    }

    /// Create an invalid-credential error.
    pub fn invalid_credential() -> Self {
        Self::new(ErrorKind::InvalidCredential, INVALID_CREDENTIAL_MESSAGE)
    }

    /// Create a not-found-or-not-owned error.
    pub fn not_found_or_not_owned() -> Self {
        Self::new(ErrorKind::NotFoundOrNotOwned, NOT_FOUND_OR_NOT_OWNED_MESSAGE)
    }

    /// Create a storage-unavailable error.
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageUnavailable, message)
    }

    /// Create a blob I/O error.
    pub fn blob_io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BlobIo, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns `true` if this error has the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Validation,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::BlobIo, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_messages_are_fixed() {
        assert_eq!(
            AppError::not_found_or_not_owned().message,
            NOT_FOUND_OR_NOT_OWNED_MESSAGE
        );
        assert_eq!(
            AppError::invalid_credential().message,
            INVALID_CREDENTIAL_MESSAGE
        );
    }

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::duplicate_user("alice");
        assert_eq!(
            err.to_string(),
            "DUPLICATE_USER: Username 'alice' already exists"
        );
    }

    #[test]
    fn test_io_error_maps_to_blob_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(err.is(ErrorKind::BlobIo));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Internal, "wrapped", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Internal);
        assert!(cloned.source.is_none());
    }
}
