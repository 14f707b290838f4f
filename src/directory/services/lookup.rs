//! Read-only directory lookups and reporting-line checks.

use crate::directory::{
    domain::{User, UserId},
    ports::{UserDirectory, UserDirectoryResult},
};
use std::sync::Arc;
use tracing::debug;

/// Read-only view over the user directory.
#[derive(Clone)]
pub struct UserLookupService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> UserLookupService<D>
where
    D: UserDirectory,
{
    /// Creates a new lookup service.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Finds a user by identifier.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns the directory error when the lookup fails.
    pub async fn find_user(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        self.directory.find_by_id(id).await
    }

    /// Resolves `employee_id` only if it names an employee reporting to
    /// `manager_id`.
    ///
    /// Returns `Ok(None)` when the user is missing, is not an employee, or
    /// reports to a different manager.
    ///
    /// # Errors
    ///
    /// Returns the directory error when the lookup fails.
    pub async fn employee_managed_by(
        &self,
        manager_id: UserId,
        employee_id: UserId,
    ) -> UserDirectoryResult<Option<User>> {
        let Some(user) = self.directory.find_by_id(employee_id).await? else {
            debug!(%employee_id, "reporting line check: user not found");
            return Ok(None);
        };

        if !user.is_employee_of(manager_id) {
            debug!(
                %employee_id,
                %manager_id,
                role = %user.role(),
                "reporting line check: user does not report to manager"
            );
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// Returns the employees reporting to `manager_id`.
    ///
    /// # Errors
    ///
    /// Returns the directory error when the lookup fails.
    pub async fn team_of(&self, manager_id: UserId) -> UserDirectoryResult<Vec<User>> {
        self.directory.list_by_manager(manager_id).await
    }
}
