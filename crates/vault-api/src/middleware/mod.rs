//! Axum middleware stack.

pub mod challenge;
pub mod cors;
pub mod logging;
