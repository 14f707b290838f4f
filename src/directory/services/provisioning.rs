//! User provisioning rules.
//!
//! Only admins and managers create users. A manager may only create
//! employees that report to themselves, and every employee must report to
//! an existing manager.

use crate::directory::{
    domain::{
        CredentialDigest, DirectoryDomainError, EmailAddress, FullName, NewUser, ParseRoleError,
        Role, User, UserId,
    },
    ports::{UserDirectory, UserDirectoryError},
};
use crate::identity::Caller;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for provisioning a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    full_name: String,
    email: String,
    credential_digest: String,
    role: String,
    manager_id: Option<UserId>,
}

impl CreateUserRequest {
    /// Creates a request with the required user fields.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        credential_digest: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            credential_digest: credential_digest.into(),
            role: role.into(),
            manager_id: None,
        }
    }

    /// Sets the manager the new user reports to.
    #[must_use]
    pub const fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }
}

/// Service-level errors for user provisioning.
#[derive(Debug, Error)]
pub enum UserProvisioningError {
    /// The caller's role does not permit the operation.
    #[error("{role} may not {operation}")]
    PermissionDenied {
        /// Role of the rejected caller.
        role: Role,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// The requested manager is missing or is not a manager.
    #[error("user {0} is not a manager")]
    InvalidManager(UserId),

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// The role string is not recognised.
    #[error(transparent)]
    InvalidRole(#[from] ParseRoleError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Result type for user provisioning operations.
pub type UserProvisioningResult<T> = Result<T, UserProvisioningError>;

/// User provisioning orchestration service.
#[derive(Clone)]
pub struct UserProvisioningService<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> UserProvisioningService<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new provisioning service.
    #[must_use]
    pub const fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self { directory, clock }
    }

    /// Creates a user on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`UserProvisioningError::PermissionDenied`] when an employee
    /// calls, or when a manager tries to create anything other than an
    /// employee reporting to themselves.
    /// Returns [`UserProvisioningError::InvalidManager`] when an admin names
    /// a manager that does not exist or is not a manager.
    /// Returns [`UserProvisioningError::Domain`] or
    /// [`UserProvisioningError::Directory`] for validation and persistence
    /// failures.
    pub async fn create_user(
        &self,
        caller: Caller,
        request: CreateUserRequest,
    ) -> UserProvisioningResult<User> {
        const OPERATION: &str = "create users";

        if caller.has_role(Role::Employee) {
            return Err(denied(caller, OPERATION));
        }

        let CreateUserRequest {
            full_name,
            email,
            credential_digest,
            role: requested_role,
            manager_id,
        } = request;
        let role = Role::try_from(requested_role.as_str())?;

        match caller.role() {
            Role::Manager if role != Role::Employee || manager_id != Some(caller.user_id()) => {
                return Err(denied(caller, "create users outside their own team"));
            }
            Role::Admin => {
                if let Some(manager) = manager_id {
                    self.ensure_manager(manager).await?;
                }
            }
            Role::Manager | Role::Employee => {}
        }

        let new_user = NewUser {
            full_name: FullName::new(full_name)?,
            email: EmailAddress::new(email)?,
            credential: CredentialDigest::new(credential_digest)?,
            role,
            manager_id,
        };
        let user = User::new(new_user, &*self.clock)?;
        self.directory.store(&user).await?;

        info!(
            user_id = %user.id(),
            role = %user.role(),
            created_by = %caller.user_id(),
            "user provisioned"
        );
        Ok(user)
    }

    /// Returns the caller's own directory record.
    ///
    /// # Errors
    ///
    /// Returns [`UserProvisioningError::NotFound`] when the record is absent
    /// or [`UserProvisioningError::Directory`] when the lookup fails.
    pub async fn current_user(&self, caller: Caller) -> UserProvisioningResult<User> {
        self.directory
            .find_by_id(caller.user_id())
            .await?
            .ok_or(UserProvisioningError::NotFound(caller.user_id()))
    }

    /// Lists every user. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserProvisioningError::PermissionDenied`] for non-admins or
    /// [`UserProvisioningError::Directory`] when the lookup fails.
    pub async fn list_users(&self, caller: Caller) -> UserProvisioningResult<Vec<User>> {
        if !caller.has_role(Role::Admin) {
            return Err(denied(caller, "list all users"));
        }
        Ok(self.directory.list_all().await?)
    }

    /// Lists the employees reporting to the calling manager.
    ///
    /// # Errors
    ///
    /// Returns [`UserProvisioningError::PermissionDenied`] for non-managers or
    /// [`UserProvisioningError::Directory`] when the lookup fails.
    pub async fn list_team(&self, caller: Caller) -> UserProvisioningResult<Vec<User>> {
        if !caller.has_role(Role::Manager) {
            return Err(denied(caller, "list a team"));
        }
        Ok(self.directory.list_by_manager(caller.user_id()).await?)
    }

    async fn ensure_manager(&self, manager_id: UserId) -> UserProvisioningResult<()> {
        let manager = self.directory.find_by_id(manager_id).await?;
        match manager {
            Some(user) if user.role() == Role::Manager => Ok(()),
            _ => Err(UserProvisioningError::InvalidManager(manager_id)),
        }
    }
}

fn denied(caller: Caller, operation: &'static str) -> UserProvisioningError {
    warn!(
        caller = %caller.user_id(),
        role = %caller.role(),
        operation,
        "provisioning request denied"
    );
    UserProvisioningError::PermissionDenied {
        role: caller.role(),
        operation,
    }
}
