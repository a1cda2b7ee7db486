//! Shared task API domain primitives.
//!
//! This crate owns deterministic route classification and request/response
//! contracts. It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod routes;
