//! Port contracts for the user directory.

pub mod repository;

#[cfg(test)]
pub use repository::MockUserDirectory;
pub use repository::{UserDirectory, UserDirectoryError, UserDirectoryResult};
