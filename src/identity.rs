//! Verified caller identity handed over by the upstream identity provider.
//!
//! Authentication happens outside this crate. Services receive a [`Caller`]
//! and trust it without re-deriving either field.

use crate::directory::domain::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Authenticated `{user_id, role}` pair for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caller {
    user_id: UserId,
    role: Role,
}

impl Caller {
    /// Creates a caller from a verified identity.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Shorthand for an admin caller.
    #[must_use]
    pub const fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    /// Shorthand for a manager caller.
    #[must_use]
    pub const fn manager(user_id: UserId) -> Self {
        Self::new(user_id, Role::Manager)
    }

    /// Shorthand for an employee caller.
    #[must_use]
    pub const fn employee(user_id: UserId) -> Self {
        Self::new(user_id, Role::Employee)
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(self) -> Role {
        self.role
    }

    /// Returns `true` when the caller holds `role`.
    #[must_use]
    pub fn has_role(self, role: Role) -> bool {
        self.role == role
    }
}
