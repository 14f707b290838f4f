//! Adapter implementations of the [`UserDirectory`] port.
//!
//! - [`memory::InMemoryUserDirectory`]: thread-safe in-memory storage
//! - [`postgres::PostgresUserDirectory`]: Diesel-backed `PostgreSQL` storage
//!
//! [`UserDirectory`]: crate::directory::ports::UserDirectory

pub mod memory;
pub mod postgres;
