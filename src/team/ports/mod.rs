//! Port contracts for the team context.
//!
//! Ports define infrastructure-agnostic interfaces used by team services.

pub mod repository;

pub use repository::{
    MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult, TeamRepository,
    TeamRepositoryError, TeamRepositoryResult,
};
