//! Port contracts for the task context.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod affiliation;
pub mod repository;

pub use affiliation::{AffiliationError, AffiliationResult, TeamAffiliation};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
