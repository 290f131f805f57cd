//! Access ledger entities.

pub mod action;
pub mod model;

pub use action::AccessAction;
pub use model::{AccessLogEntry, NewAccessLogEntry};
