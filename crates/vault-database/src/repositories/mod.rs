//! PostgreSQL implementations of the store traits.

pub mod access_log;
pub mod file;
pub mod user;

pub use access_log::AccessLogRepository;
pub use file::FileRepository;
pub use user::UserRepository;

use vault_core::error::{AppError, ErrorKind};

/// Whether `err` is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Wrap a sqlx error as `StorageUnavailable`.
pub(crate) fn storage_error(message: &'static str, err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::StorageUnavailable, message, err)
}
