//! `PostgreSQL` adapters for the user directory.

mod models;
mod repository;
mod schema;

pub use repository::{DirectoryPgPool, PostgresUserDirectory};
