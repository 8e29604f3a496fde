//! Password hashing port.

use crate::identity::domain::PasswordHash;
use thiserror::Error;

/// Credential hashing and verification contract.
///
/// Implementations own the encoded storage format; callers treat hashes as
/// opaque [`PasswordHash`] values.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plain-text password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when hashing fails.
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Verifies a plain-text password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::MalformedHash`] when the stored value
    /// does not follow the implementation's encoded format.
    fn verify(&self, plain: &str, stored: &PasswordHash) -> Result<bool, PasswordHashError>;
}

/// Errors returned by password hasher implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordHashError {
    /// The stored hash is not in the expected encoded format.
    #[error("malformed stored password hash")]
    MalformedHash,
}
