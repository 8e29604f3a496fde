//! Adapter implementations for identity ports.

pub mod memory;
pub mod pbkdf2;

pub use pbkdf2::Pbkdf2PasswordHasher;
