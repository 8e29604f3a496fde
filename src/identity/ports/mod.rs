//! Port contracts for the identity context.
//!
//! Ports define infrastructure-agnostic interfaces used by identity
//! services.

pub mod password;
pub mod repository;

pub use password::{PasswordHashError, PasswordHasher};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
