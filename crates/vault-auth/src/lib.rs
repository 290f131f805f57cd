//! # vault-auth
//!
//! Credential handling for FileVault.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and registration policy
//! - `credential`: per-request credential verification against the identity store

pub mod credential;
pub mod password;

pub use credential::{CredentialVerifier, Credentials};
pub use password::{CredentialHasher, CredentialPolicy};
