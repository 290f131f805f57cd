//! In-memory implementations of the store traits.
//!
//! Used by the `memory` database provider and by tests. Atomicity of
//! get-or-create comes from `DashMap` entry locking, so these stores are
//! only correct within a single process.

pub mod access_log;
pub mod file;
pub mod user;

pub use access_log::MemoryAccessLedger;
pub use file::MemoryFileRegistry;
pub use user::MemoryIdentityStore;
