//! Service layer for team management and the invitation lifecycle.

use crate::identity::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::notification::{
    domain::NotificationKind,
    ports::{NotificationSink, SendNotification},
};
use crate::team::{
    domain::{Team, TeamDomainError, TeamId, TeamMembership, TeamName, TeamRole},
    ports::{
        MembershipRepository, MembershipRepositoryError, TeamRepository, TeamRepositoryError,
    },
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for team and membership operations.
#[derive(Debug, Error)]
pub enum TeamServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),

    /// The team name is already taken.
    #[error("team name '{0}' already exists")]
    DuplicateTeamName(TeamName),

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The referenced team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// No membership exists for the pair.
    #[error("no membership for user {user_id} in team {team_id}")]
    MembershipNotFound {
        /// Member side of the missing pair.
        user_id: UserId,
        /// Team side of the missing pair.
        team_id: TeamId,
    },

    /// A membership record for the pair already exists, whatever its
    /// status.
    #[error("user {user_id} is already a member of or invited to team {team_id}")]
    MembershipAlreadyExists {
        /// Member of the existing record.
        user_id: UserId,
        /// Team of the existing record.
        team_id: TeamId,
    },

    /// The member is the team's sole active owner and cannot be removed or
    /// demoted.
    #[error("user {user_id} is the last owner of team {team_id}")]
    LastOwner {
        /// The sole owner.
        user_id: UserId,
        /// The team that would be left ownerless.
        team_id: TeamId,
    },

    /// Team repository operation failed.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),

    /// Membership repository operation failed.
    #[error(transparent)]
    Memberships(#[from] MembershipRepositoryError),

    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

/// Result type for team service operations.
pub type TeamServiceResult<T> = Result<T, TeamServiceError>;

/// Team management and invitation lifecycle orchestration service.
#[derive(Clone)]
pub struct TeamService<T, M, U, N, C>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    teams: Arc<T>,
    memberships: Arc<M>,
    users: Arc<U>,
    notifications: Arc<N>,
    clock: Arc<C>,
}

impl<T, M, U, N, C> TeamService<T, M, U, N, C>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a new team service.
    #[must_use]
    pub const fn new(
        teams: Arc<T>,
        memberships: Arc<M>,
        users: Arc<U>,
        notifications: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            teams,
            memberships,
            users,
            notifications,
            clock,
        }
    }

    /// Creates a team and makes the creator its accepted owner.
    ///
    /// The two writes are compensated: if the owner membership cannot be
    /// stored, the freshly created team is deleted again and the
    /// membership failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Domain`] when the name fails validation,
    /// [`TeamServiceError::DuplicateTeamName`] when the name is taken, or
    /// [`TeamServiceError::UserNotFound`] when the creator id does not
    /// resolve.
    pub async fn create_team(
        &self,
        name: impl Into<String>,
        creator_id: UserId,
    ) -> TeamServiceResult<Team> {
        let name = TeamName::new(name)?;
        if self.teams.find_by_name(&name).await?.is_some() {
            return Err(TeamServiceError::DuplicateTeamName(name));
        }
        let creator = self.find_user_or_error(creator_id).await?;

        let team = Team::new(name, &*self.clock);
        self.teams.create(&team).await?;

        let membership = TeamMembership::founder(creator.id(), team.id(), &*self.clock);
        if let Err(err) = self.memberships.create(&membership).await {
            if let Err(cleanup_err) = self.teams.delete(team.id()).await {
                tracing::error!(
                    team_id = %team.id(),
                    error = %cleanup_err,
                    "failed to roll back team after owner membership rejection",
                );
            }
            return Err(err.into());
        }
        Ok(team)
    }

    /// Renames a team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::TeamNotFound`] when the id does not
    /// resolve, or [`TeamServiceError::DuplicateTeamName`] when the new
    /// name belongs to another team.
    pub async fn update_team(
        &self,
        team_id: TeamId,
        new_name: impl Into<String>,
    ) -> TeamServiceResult<Team> {
        let name = TeamName::new(new_name)?;
        let mut team = self.find_team_or_error(team_id).await?;

        if let Some(existing) = self.teams.find_by_name(&name).await? {
            if existing.id() != team_id {
                return Err(TeamServiceError::DuplicateTeamName(name));
            }
        }

        team.rename(name);
        self.teams.update(&team).await?;
        Ok(team)
    }

    /// Deletes a team.
    ///
    /// Cascading cleanup of memberships and projects is the storage
    /// layer's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::TeamNotFound`] when the id does not
    /// resolve.
    pub async fn delete_team(&self, team_id: TeamId) -> TeamServiceResult<()> {
        match self.teams.delete(team_id).await {
            Ok(()) => Ok(()),
            Err(TeamRepositoryError::NotFound(id)) => Err(TeamServiceError::TeamNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Finds a team by identifier.
    ///
    /// Returns `Ok(None)` when no team has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Teams`] when persistence lookup fails.
    pub async fn find_team_by_id(&self, team_id: TeamId) -> TeamServiceResult<Option<Team>> {
        Ok(self.teams.find_by_id(team_id).await?)
    }

    /// Returns all teams.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Teams`] when persistence lookup fails.
    pub async fn list_teams(&self) -> TeamServiceResult<Vec<Team>> {
        Ok(self.teams.list_all().await?)
    }

    /// Invites a user to a team with the role they will hold on
    /// acceptance.
    ///
    /// Creates a pending membership and notifies the invitee. A pair that
    /// already has a record, pending or accepted, cannot be invited
    /// again; a previously rejected pair has no record and can.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::UserNotFound`] /
    /// [`TeamServiceError::TeamNotFound`] when a reference does not
    /// resolve, or [`TeamServiceError::MembershipAlreadyExists`] when a
    /// record for the pair exists.
    pub async fn invite_member(
        &self,
        user_id: UserId,
        team_id: TeamId,
        role: TeamRole,
    ) -> TeamServiceResult<TeamMembership> {
        self.find_user_or_error(user_id).await?;
        let team = self.find_team_or_error(team_id).await?;

        if self.memberships.find(user_id, team_id).await?.is_some() {
            return Err(TeamServiceError::MembershipAlreadyExists { user_id, team_id });
        }

        let membership = TeamMembership::invited(user_id, team_id, role, &*self.clock);
        self.memberships.create(&membership).await?;

        let message = format!(
            "You have been invited to join the team '{}' as a {}.",
            team.name(),
            role
        );
        let request = SendNotification::new(user_id, message, NotificationKind::TeamInvitation)
            .with_related_entity(team_id.into_inner());
        if let Err(err) = self.notifications.send(request).await {
            tracing::warn!(
                user_id = %user_id,
                team_id = %team_id,
                error = %err,
                "failed to deliver team invitation notification",
            );
        }
        Ok(membership)
    }

    /// Accepts a pending invitation, keeping the role from invite time.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::MembershipNotFound`] when no record
    /// exists for the pair, or [`TeamServiceError::Domain`] when the
    /// invitation is not pending.
    pub async fn accept_invitation(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> TeamServiceResult<TeamMembership> {
        let mut membership = self.find_membership_or_error(user_id, team_id).await?;
        membership.accept(&*self.clock)?;
        self.memberships.update(&membership).await?;
        Ok(membership)
    }

    /// Rejects a pending invitation by deleting the membership record.
    ///
    /// No rejected state is retained; the pair may be invited again
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::MembershipNotFound`] when no record
    /// exists for the pair, or [`TeamServiceError::Domain`] when the
    /// invitation is not pending.
    pub async fn reject_invitation(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> TeamServiceResult<()> {
        let membership = self.find_membership_or_error(user_id, team_id).await?;
        membership.ensure_pending()?;
        self.memberships.delete(user_id, team_id).await?;
        Ok(())
    }

    /// Removes a member from a team, covering both owner-initiated
    /// removal and a member leaving.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::MembershipNotFound`] when no record
    /// exists for the pair, or [`TeamServiceError::LastOwner`] when the
    /// member is the team's sole active owner.
    pub async fn remove_member(&self, user_id: UserId, team_id: TeamId) -> TeamServiceResult<()> {
        let membership = self.find_membership_or_error(user_id, team_id).await?;
        self.ensure_not_last_owner(&membership).await?;
        self.memberships.delete(user_id, team_id).await?;
        Ok(())
    }

    /// Changes a member's role.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::MembershipNotFound`] when no record
    /// exists for the pair, or [`TeamServiceError::LastOwner`] when the
    /// change would demote the team's sole active owner.
    pub async fn change_member_role(
        &self,
        user_id: UserId,
        team_id: TeamId,
        new_role: TeamRole,
    ) -> TeamServiceResult<TeamMembership> {
        let mut membership = self.find_membership_or_error(user_id, team_id).await?;
        if new_role != TeamRole::Owner {
            self.ensure_not_last_owner(&membership).await?;
        }
        membership.change_role(new_role);
        self.memberships.update(&membership).await?;
        Ok(membership)
    }

    /// Returns whether the user holds an accepted owner membership of the
    /// team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Memberships`] when persistence lookup
    /// fails.
    pub async fn is_team_owner(&self, user_id: UserId, team_id: TeamId) -> TeamServiceResult<bool> {
        let membership = self.memberships.find(user_id, team_id).await?;
        Ok(membership.is_some_and(|record| record.is_active_owner()))
    }

    /// Returns whether the user holds an accepted membership of the team,
    /// any role.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Memberships`] when persistence lookup
    /// fails.
    pub async fn is_member_of_team(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> TeamServiceResult<bool> {
        let membership = self.memberships.find(user_id, team_id).await?;
        Ok(membership.is_some_and(|record| record.is_active()))
    }

    /// Returns whether two users share at least one team both hold
    /// accepted memberships of.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Memberships`] when persistence lookup
    /// fails.
    pub async fn users_share_team(&self, a: UserId, b: UserId) -> TeamServiceResult<bool> {
        let first: HashSet<TeamId> = self.active_team_ids(a).await?;
        if first.is_empty() {
            return Ok(false);
        }
        let second = self.active_team_ids(b).await?;
        Ok(first.intersection(&second).next().is_some())
    }

    /// Returns the teams the user holds an accepted membership of.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn teams_for_user(&self, user_id: UserId) -> TeamServiceResult<Vec<Team>> {
        let mut teams = Vec::new();
        for team_id in self.active_team_ids(user_id).await? {
            if let Some(team) = self.teams.find_by_id(team_id).await? {
                teams.push(team);
            }
        }
        Ok(teams)
    }

    /// Returns the users holding accepted memberships of the team.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn users_in_team(&self, team_id: TeamId) -> TeamServiceResult<Vec<User>> {
        let memberships = self.memberships.list_by_team(team_id).await?;
        let mut users = Vec::new();
        for membership in memberships
            .iter()
            .filter(|membership| membership.is_active())
        {
            if let Some(user) = self.users.find_by_id(membership.user_id()).await? {
                users.push(user);
            }
        }
        Ok(users)
    }

    /// Returns all membership records of the team, any status.
    ///
    /// Management surfaces use this to show pending invitations alongside
    /// active members.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Memberships`] when persistence lookup
    /// fails.
    pub async fn memberships_for_team(
        &self,
        team_id: TeamId,
    ) -> TeamServiceResult<Vec<TeamMembership>> {
        Ok(self.memberships.list_by_team(team_id).await?)
    }

    /// Finds the membership record for the given pair.
    ///
    /// Returns `Ok(None)` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Memberships`] when persistence lookup
    /// fails.
    pub async fn membership(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> TeamServiceResult<Option<TeamMembership>> {
        Ok(self.memberships.find(user_id, team_id).await?)
    }

    async fn active_team_ids(&self, user_id: UserId) -> TeamServiceResult<HashSet<TeamId>> {
        let memberships = self.memberships.list_by_user(user_id).await?;
        Ok(memberships
            .iter()
            .filter(|membership| membership.is_active())
            .map(TeamMembership::team_id)
            .collect())
    }

    /// Fails when the membership is the sole accepted owner record of its
    /// team. Memberships that are not accepted owners pass trivially.
    async fn ensure_not_last_owner(&self, membership: &TeamMembership) -> TeamServiceResult<()> {
        if !membership.is_active_owner() {
            return Ok(());
        }
        let owners = self
            .memberships
            .list_by_team(membership.team_id())
            .await?
            .iter()
            .filter(|record| record.is_active_owner())
            .count();
        if owners <= 1 {
            return Err(TeamServiceError::LastOwner {
                user_id: membership.user_id(),
                team_id: membership.team_id(),
            });
        }
        Ok(())
    }

    async fn find_user_or_error(&self, user_id: UserId) -> TeamServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(TeamServiceError::UserNotFound(user_id))
    }

    async fn find_team_or_error(&self, team_id: TeamId) -> TeamServiceResult<Team> {
        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or(TeamServiceError::TeamNotFound(team_id))
    }

    async fn find_membership_or_error(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> TeamServiceResult<TeamMembership> {
        self.memberships
            .find(user_id, team_id)
            .await?
            .ok_or(TeamServiceError::MembershipNotFound { user_id, team_id })
    }
}
