//! Domain model for the organisational user directory.
//!
//! Users form a two-level tree: managers own employees through an explicit
//! manager reference, while admins sit outside the tree.

mod error;
mod ids;
mod role;
mod user;

pub use error::{DirectoryDomainError, ParseRoleError};
pub use ids::{
    CredentialDigest, EmailAddress, FullName, MAX_EMAIL_LENGTH, MAX_FULL_NAME_LENGTH, UserId,
};
pub use role::Role;
pub use user::{NewUser, PersistedUserData, User, UserProfile};
