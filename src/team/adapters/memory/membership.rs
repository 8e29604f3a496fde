//! In-memory membership repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::team::{
    domain::{TeamId, TeamMembership},
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};

/// Thread-safe in-memory membership repository.
///
/// Keys records by the `(user, team)` pair, so the uniqueness invariant is
/// enforced by the map itself rather than by caller-side existence checks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    state: Arc<RwLock<HashMap<(UserId, TeamId), TeamMembership>>>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> MembershipRepositoryError {
    MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn create(&self, membership: &TeamMembership) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let key = (membership.user_id(), membership.team_id());
        if state.contains_key(&key) {
            return Err(MembershipRepositoryError::DuplicateMembership {
                user_id: membership.user_id(),
                team_id: membership.team_id(),
            });
        }
        state.insert(key, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &TeamMembership) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let key = (membership.user_id(), membership.team_id());
        if !state.contains_key(&key) {
            return Err(MembershipRepositoryError::NotFound {
                user_id: membership.user_id(),
                team_id: membership.team_id(),
            });
        }
        state.insert(key, membership.clone());
        Ok(())
    }

    async fn delete(&self, user_id: UserId, team_id: TeamId) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .remove(&(user_id, team_id))
            .map(|_| ())
            .ok_or(MembershipRepositoryError::NotFound { user_id, team_id })
    }

    async fn find(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> MembershipRepositoryResult<Option<TeamMembership>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&(user_id, team_id)).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Vec<TeamMembership>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|membership| membership.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_team(
        &self,
        team_id: TeamId,
    ) -> MembershipRepositoryResult<Vec<TeamMembership>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|membership| membership.team_id() == team_id)
            .cloned()
            .collect())
    }
}
