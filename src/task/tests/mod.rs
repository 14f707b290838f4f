//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain values and the status machine,
//! the in-memory store, and the assignment and lifecycle services.
