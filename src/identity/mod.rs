//! User accounts and authentication for Aalto.
//!
//! This module covers account registration with uniqueness guarantees,
//! credential verification against salted password hashes, and profile
//! maintenance. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
