//! Identifier and validated scalar types for the user directory.

use super::DirectoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum full name length, matching the `VARCHAR(255)` `full_name` column.
pub const MAX_FULL_NAME_LENGTH: usize = 255;

/// Maximum email length, matching the `VARCHAR(320)` `email` column.
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for UserId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of a user, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    /// Creates a validated full name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyFullName`] when the value is empty
    /// after trimming, or [`DirectoryDomainError::FullNameTooLong`] when it
    /// exceeds [`MAX_FULL_NAME_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyFullName);
        }
        let length = trimmed.chars().count();
        if length > MAX_FULL_NAME_LENGTH {
            return Err(DirectoryDomainError::FullNameTooLong {
                length,
                max: MAX_FULL_NAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalised, lowercase email address.
///
/// Email addresses are unique across the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// The input is trimmed and lowercased. Exactly one `@` separating a
    /// non-empty local part from a non-empty domain is required, and no
    /// whitespace may appear.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::InvalidEmail`] when the value is
    /// malformed, or [`DirectoryDomainError::EmailTooLong`] when it exceeds
    /// [`MAX_EMAIL_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(DirectoryDomainError::InvalidEmail(raw));
        }
        let length = normalized.chars().count();
        if length > MAX_EMAIL_LENGTH {
            return Err(DirectoryDomainError::EmailTooLong {
                length,
                max: MAX_EMAIL_LENGTH,
            });
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque credential digest produced by the identity layer.
///
/// The directory stores it verbatim and never inspects it. `Debug` output is
/// redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialDigest(String);

impl CredentialDigest {
    /// Wraps a credential digest.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyCredential`] when the digest is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let digest = value.into();
        if digest.is_empty() {
            return Err(DirectoryDomainError::EmptyCredential);
        }
        Ok(Self(digest))
    }

    /// Exposes the stored digest for persistence adapters.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialDigest(<redacted>)")
    }
}
