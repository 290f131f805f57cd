//! The access gateway: the only path by which request handlers touch
//! file records, file bytes, or the access ledger.

pub mod service;

pub use service::{AccessGateway, Download};
