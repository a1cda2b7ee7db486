//! Runtime module boundary over the core crate's primitives.

pub use task_api_core::contract;
pub use task_api_core::routes;
