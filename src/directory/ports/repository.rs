//! Directory port for user persistence and lookup.

use crate::directory::domain::{EmailAddress, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User persistence and lookup contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateUser`] when the identifier
    /// already exists or [`UserDirectoryError::DuplicateEmail`] when the email
    /// address is taken.
    async fn store(&self, user: &User) -> UserDirectoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>>;

    /// Finds a user by email address.
    ///
    /// Returns `None` when no user has the address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserDirectoryResult<Option<User>>;

    /// Returns every user, oldest first.
    async fn list_all(&self) -> UserDirectoryResult<Vec<User>>;

    /// Returns the employees reporting to `manager_id`, oldest first.
    async fn list_by_manager(&self, manager_id: UserId) -> UserDirectoryResult<Vec<User>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The email address is already registered.
    #[error("email address already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
