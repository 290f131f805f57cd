//! # vault-database
//!
//! Persistence for FileVault's metadata: the identity store, the file
//! registry, and the append-only access ledger. Each is a trait with a
//! PostgreSQL implementation (`repositories`) and an in-memory
//! implementation (`memory`); [`Stores`] selects one set from
//! configuration.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod stores;
pub mod traits;

pub use connection::DatabasePool;
pub use stores::Stores;
pub use traits::{AccessLedger, FileRegistry, IdentityStore};
