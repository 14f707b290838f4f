//! Error types for user directory validation and parsing.

use super::Role;
use thiserror::Error;

/// Errors returned while constructing user directory values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The full name is empty after trimming.
    #[error("full name must not be empty")]
    EmptyFullName,

    /// The full name exceeds the stored column width.
    #[error("full name is {length} characters, the limit is {max}")]
    FullNameTooLong {
        /// Character count of the trimmed name.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The email address exceeds the stored column width.
    #[error("email address is {length} characters, the limit is {max}")]
    EmailTooLong {
        /// Character count of the normalised address.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// The credential digest is empty.
    #[error("credential digest must not be empty")]
    EmptyCredential,

    /// An employee was created without a manager reference.
    #[error("employees must report to a manager")]
    MissingManager,

    /// A non-employee was given a manager reference.
    #[error("only employees may have a manager, not {0}")]
    UnexpectedManager(Role),
}

/// Error returned while parsing roles from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
