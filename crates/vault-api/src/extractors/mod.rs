//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, basic_credentials};
pub use json::ValidatedJson;
