//! AWS-oriented adapters and handlers for the task CRUD API.
//!
//! This crate owns runtime integration details (the Lambda handler and the
//! DynamoDB store adapter) and exposes a single runtime module boundary for
//! contract and route primitives.

pub mod adapters;
pub mod handlers;
pub mod runtime;
