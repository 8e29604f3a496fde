//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the maximum stored length.
    #[error("username '{0}' exceeds {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong(String),

    /// The email address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// The email address has no local part or domain.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The plain-text password is empty after trimming.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Maximum length for a username, matching the original schema column.
pub(crate) const MAX_USERNAME_LENGTH: usize = 100;
