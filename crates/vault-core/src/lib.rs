//! # vault-core
//!
//! Core crate for FileVault. Contains the collaborator traits (blob store,
//! completion client, text extraction), configuration schemas, typed
//! identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
