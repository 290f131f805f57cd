//! Request handlers, one module per area.

pub mod auth;
pub mod file;
pub mod health;
pub mod history;
pub mod query;
