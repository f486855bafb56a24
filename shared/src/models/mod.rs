//! Data models
//!
//! Read-only views of records served by the REST backend.
//! Field names follow the backend's camelCase JSON.

pub mod order;

// Re-exports
pub use order::*;
