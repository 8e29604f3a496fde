//! Teams, memberships, and the invitation lifecycle for Aalto.
//!
//! This module implements the team-membership authorisation model: team
//! creation with founder ownership, the pending/accepted invitation state
//! machine, member removal and role changes with last-owner protection,
//! and the shared-team queries the task visibility filter builds on. The
//! module follows hexagonal architecture:
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
