//! Repository ports for team and membership persistence.

use crate::identity::domain::UserId;
use crate::team::domain::{Team, TeamId, TeamMembership, TeamName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for team repository operations.
pub type TeamRepositoryResult<T> = Result<T, TeamRepositoryError>;

/// Team persistence contract.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::DuplicateTeamName`] when the name is
    /// already taken.
    async fn create(&self, team: &Team) -> TeamRepositoryResult<()>;

    /// Persists changes to an existing team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::NotFound`] when the team does not
    /// exist, or [`TeamRepositoryError::DuplicateTeamName`] when the new
    /// name collides with another team.
    async fn update(&self, team: &Team) -> TeamRepositoryResult<()>;

    /// Deletes a team by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::NotFound`] when the team does not
    /// exist.
    async fn delete(&self, id: TeamId) -> TeamRepositoryResult<()>;

    /// Finds a team by internal identifier.
    ///
    /// Returns `None` when the team does not exist.
    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>>;

    /// Finds a team by unique name.
    ///
    /// Returns `None` when no team has the name.
    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>>;

    /// Returns all teams.
    async fn list_all(&self) -> TeamRepositoryResult<Vec<Team>>;
}

/// Errors returned by team repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TeamRepositoryError {
    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// The team name is already taken.
    #[error("duplicate team name: {0}")]
    DuplicateTeamName(TeamName),

    /// The team was not found.
    #[error("team not found: {0}")]
    NotFound(TeamId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TeamRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for membership repository operations.
pub type MembershipRepositoryResult<T> = Result<T, MembershipRepositoryError>;

/// Membership persistence contract.
///
/// The `(user, team)` pair is the record identity; implementations must
/// enforce its uniqueness at insert time rather than relying on callers'
/// existence checks.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Stores a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::DuplicateMembership`] when a
    /// record for the pair already exists.
    async fn create(&self, membership: &TeamMembership) -> MembershipRepositoryResult<()>;

    /// Persists changes to an existing membership (status, role).
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::NotFound`] when no record
    /// exists for the pair.
    async fn update(&self, membership: &TeamMembership) -> MembershipRepositoryResult<()>;

    /// Deletes the membership for the given pair.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::NotFound`] when no record
    /// exists for the pair.
    async fn delete(&self, user_id: UserId, team_id: TeamId) -> MembershipRepositoryResult<()>;

    /// Finds the membership for the given pair.
    ///
    /// Returns `None` when no record exists.
    async fn find(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> MembershipRepositoryResult<Option<TeamMembership>>;

    /// Returns all memberships held by the given user, any status.
    async fn list_by_user(&self, user_id: UserId)
    -> MembershipRepositoryResult<Vec<TeamMembership>>;

    /// Returns all memberships of the given team, any status.
    async fn list_by_team(&self, team_id: TeamId)
    -> MembershipRepositoryResult<Vec<TeamMembership>>;
}

/// Errors returned by membership repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipRepositoryError {
    /// A membership for the pair already exists.
    #[error("duplicate membership for user {user_id} in team {team_id}")]
    DuplicateMembership {
        /// Member of the offending record.
        user_id: UserId,
        /// Team of the offending record.
        team_id: TeamId,
    },

    /// No membership exists for the pair.
    #[error("membership not found for user {user_id} in team {team_id}")]
    NotFound {
        /// Member side of the missing pair.
        user_id: UserId,
        /// Team side of the missing pair.
        team_id: TeamId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
