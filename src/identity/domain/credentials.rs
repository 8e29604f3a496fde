//! Opaque credential hash wrapper.

use serde::{Deserialize, Serialize};

/// Encoded password hash as produced by a
/// [`PasswordHasher`](crate::identity::ports::PasswordHasher).
///
/// The wrapper is deliberately opaque: the domain never inspects the
/// encoded form, and equality comparisons for verification happen inside
/// the hasher where they can be constant-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already-encoded hash string.
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Returns the encoded hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
