//! Error types for team domain validation and parsing.

use super::InvitationStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating team domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The team name exceeds the maximum stored length.
    #[error("team name '{0}' exceeds 100 characters")]
    TeamNameTooLong(String),

    /// The invitation is not awaiting a response.
    #[error("invitation is not pending (current status: {found})")]
    InvitationNotPending {
        /// Status the membership was found in.
        found: InvitationStatus,
    },
}

/// Error returned while parsing team roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown team role: {0}")]
pub struct ParseTeamRoleError(pub String);

/// Error returned while parsing invitation statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown invitation status: {0}")]
pub struct ParseInvitationStatusError(pub String);
