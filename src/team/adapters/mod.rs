//! Adapter implementations for team ports.

pub mod memory;

pub use memory::{InMemoryMembershipRepository, InMemoryTeamRepository};
