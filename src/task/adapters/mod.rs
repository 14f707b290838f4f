//! Adapter implementations of the [`TaskStore`] port.
//!
//! - [`memory::InMemoryTaskStore`]: thread-safe in-memory storage
//! - [`postgres::PostgresTaskStore`]: Diesel-backed `PostgreSQL` storage
//!
//! [`TaskStore`]: crate::task::ports::TaskStore

pub mod memory;
pub mod postgres;
