//! HTTP-level tests driving the router against in-memory backends.

mod helpers;

mod auth_test;
mod file_test;
mod query_test;
