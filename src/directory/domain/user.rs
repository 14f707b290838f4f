//! User aggregate for the organisational directory.

use super::{CredentialDigest, DirectoryDomainError, EmailAddress, FullName, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Directory user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    full_name: FullName,
    email: EmailAddress,
    credential: CredentialDigest,
    role: Role,
    manager_id: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub full_name: FullName,
    /// Unique email address.
    pub email: EmailAddress,
    /// Opaque credential digest.
    pub credential: CredentialDigest,
    /// Organisational role.
    pub role: Role,
    /// Manager the user reports to; employees only.
    pub manager_id: Option<UserId>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub full_name: FullName,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted credential digest.
    pub credential: CredentialDigest,
    /// Persisted role.
    pub role: Role,
    /// Persisted manager reference.
    pub manager_id: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub full_name: FullName,
    /// Email address.
    pub email: EmailAddress,
    /// Organisational role.
    pub role: Role,
    /// Manager reference, present for employees.
    pub manager_id: Option<UserId>,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::MissingManager`] when an employee has
    /// no manager reference, or [`DirectoryDomainError::UnexpectedManager`]
    /// when an admin or manager is given one.
    pub fn new(new_user: NewUser, clock: &impl Clock) -> Result<Self, DirectoryDomainError> {
        let NewUser {
            full_name,
            email,
            credential,
            role,
            manager_id,
        } = new_user;

        match (role, manager_id) {
            (Role::Employee, None) => return Err(DirectoryDomainError::MissingManager),
            (Role::Admin | Role::Manager, Some(_)) => {
                return Err(DirectoryDomainError::UnexpectedManager(role));
            }
            _ => {}
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: UserId::new(),
            full_name,
            email,
            credential,
            role,
            manager_id,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            full_name: data.full_name,
            email: data.email,
            credential: data.credential,
            role: data.role,
            manager_id: data.manager_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the credential digest.
    #[must_use]
    pub const fn credential(&self) -> &CredentialDigest {
        &self.credential
    }

    /// Returns the organisational role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the manager reference, if any.
    #[must_use]
    pub const fn manager_id(&self) -> Option<UserId> {
        self.manager_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when this user is an employee reporting to `manager_id`.
    #[must_use]
    pub fn is_employee_of(&self, manager_id: UserId) -> bool {
        self.role == Role::Employee && self.manager_id == Some(manager_id)
    }

    /// Returns the credential-free public view of this user.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role,
            manager_id: self.manager_id,
        }
    }
}
