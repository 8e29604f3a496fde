//! PBKDF2-HMAC-SHA256 password hasher.

use crate::identity::domain::PasswordHash;
use crate::identity::ports::{PasswordHashError, PasswordHasher};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// PBKDF2 iteration count (NIST recommends at least 10 000 for
/// PBKDF2-HMAC-SHA256).
const ITERATIONS: u32 = 10_000;
/// Derived key length in bytes (256 bits for SHA-256).
const KEY_LENGTH: usize = 32;
/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

/// Password hasher backed by PBKDF2-HMAC-SHA256.
///
/// Each hash uses a fresh random salt, so identical passwords produce
/// different encodings. Hashes are stored as `salt:key` with both halves
/// base64 encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2PasswordHasher;

impl Pbkdf2PasswordHasher {
    /// Creates a hasher with the default parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn derive(plain: &str, salt: &[u8]) -> [u8; KEY_LENGTH] {
        let mut key = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(plain.as_bytes(), salt, ITERATIONS, &mut key);
        key
    }
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHashError> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);

        let key = Self::derive(plain, &salt);
        let encoded = format!("{}:{}", STANDARD.encode(salt), STANDARD.encode(key));
        Ok(PasswordHash::new(encoded))
    }

    fn verify(&self, plain: &str, stored: &PasswordHash) -> Result<bool, PasswordHashError> {
        let (salt_part, key_part) = stored
            .as_str()
            .split_once(':')
            .ok_or(PasswordHashError::MalformedHash)?;

        let salt = STANDARD
            .decode(salt_part)
            .map_err(|_| PasswordHashError::MalformedHash)?;
        let stored_key = STANDARD
            .decode(key_part)
            .map_err(|_| PasswordHashError::MalformedHash)?;

        let derived = Self::derive(plain, &salt);
        Ok(derived.as_slice().ct_eq(stored_key.as_slice()).into())
    }
}
