//! Task lifecycle and visibility for Aalto.
//!
//! This module implements task creation, creator-only mutation and
//! deletion, assignment notifications, and the visibility rule that
//! governs every list read: creators and assignees always see their
//! tasks, public tasks are visible to all, restricted tasks require a
//! shared team with the creator, and private tasks are creator-only. The
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
