//! Membership-backed implementation of the affiliation port.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::identity::domain::UserId;
use crate::task::ports::{AffiliationError, AffiliationResult, TeamAffiliation};
use crate::team::{
    domain::{TeamId, TeamMembership},
    ports::MembershipRepository,
};

/// [`TeamAffiliation`] adapter answering from a membership repository.
#[derive(Clone)]
pub struct MembershipAffiliation<M>
where
    M: MembershipRepository,
{
    memberships: Arc<M>,
}

impl<M> MembershipAffiliation<M>
where
    M: MembershipRepository,
{
    /// Creates an adapter over the given membership repository.
    #[must_use]
    pub const fn new(memberships: Arc<M>) -> Self {
        Self { memberships }
    }

    async fn active_team_ids(&self, user_id: UserId) -> AffiliationResult<HashSet<TeamId>> {
        let memberships = self
            .memberships
            .list_by_user(user_id)
            .await
            .map_err(AffiliationError::lookup)?;
        Ok(memberships
            .iter()
            .filter(|membership| membership.is_active())
            .map(TeamMembership::team_id)
            .collect())
    }
}

#[async_trait]
impl<M> TeamAffiliation for MembershipAffiliation<M>
where
    M: MembershipRepository,
{
    async fn users_share_team(&self, a: UserId, b: UserId) -> AffiliationResult<bool> {
        let first = self.active_team_ids(a).await?;
        if first.is_empty() {
            return Ok(false);
        }
        let second = self.active_team_ids(b).await?;
        Ok(first.intersection(&second).next().is_some())
    }
}
