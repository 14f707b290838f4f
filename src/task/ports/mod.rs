//! Port contracts for task assignment and lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

#[cfg(test)]
pub use repository::MockTaskStore;
pub use repository::{TaskStore, TaskStoreError, TaskStoreResult};
