//! Password hashing and registration policy.

pub mod hasher;
pub mod policy;

pub use hasher::CredentialHasher;
pub use policy::CredentialPolicy;
