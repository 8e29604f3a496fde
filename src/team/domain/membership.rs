//! Team membership edge entity and its role/status enumerations.

use super::{ParseInvitationStatusError, ParseTeamRoleError, TeamDomainError, TeamId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a member holds within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Regular member.
    Member,
    /// Team manager: may invite, remove, and promote members.
    Owner,
}

impl TeamRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Owner => "owner",
        }
    }
}

impl TryFrom<&str> for TeamRole {
    type Error = ParseTeamRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "member" => Ok(Self::Member),
            "owner" => Ok(Self::Owner),
            _ => Err(ParseTeamRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response state of a membership's invitation.
///
/// There is deliberately no `Rejected` value: rejecting an invitation
/// deletes the membership record, so a rejected pair simply has no row and
/// may be invited again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Invitation sent, awaiting a response.
    Pending,
    /// Invitation accepted; the membership is active.
    Accepted,
}

impl InvitationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl TryFrom<&str> for InvitationStatus {
    type Error = ParseInvitationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(ParseInvitationStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership edge between a user and a team.
///
/// Identified by the `(user, team)` pair; at most one record exists per
/// pair at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    user_id: UserId,
    team_id: TeamId,
    role: TeamRole,
    status: InvitationStatus,
    invited_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMembershipData {
    /// Persisted member.
    pub user_id: UserId,
    /// Persisted team.
    pub team_id: TeamId,
    /// Persisted role.
    pub role: TeamRole,
    /// Persisted invitation status.
    pub status: InvitationStatus,
    /// Persisted invitation timestamp.
    pub invited_at: DateTime<Utc>,
    /// Persisted response timestamp, if any.
    pub responded_at: Option<DateTime<Utc>>,
}

impl TeamMembership {
    /// Creates a pending membership for an invited user.
    #[must_use]
    pub fn invited(user_id: UserId, team_id: TeamId, role: TeamRole, clock: &impl Clock) -> Self {
        Self {
            user_id,
            team_id,
            role,
            status: InvitationStatus::Pending,
            invited_at: clock.utc(),
            responded_at: None,
        }
    }

    /// Creates the accepted owner membership a team's creator receives.
    #[must_use]
    pub fn founder(user_id: UserId, team_id: TeamId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            user_id,
            team_id,
            role: TeamRole::Owner,
            status: InvitationStatus::Accepted,
            invited_at: timestamp,
            responded_at: Some(timestamp),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMembershipData) -> Self {
        Self {
            user_id: data.user_id,
            team_id: data.team_id,
            role: data.role,
            status: data.status,
            invited_at: data.invited_at,
            responded_at: data.responded_at,
        }
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the member's role.
    #[must_use]
    pub const fn role(&self) -> TeamRole {
        self.role
    }

    /// Returns the invitation status.
    #[must_use]
    pub const fn status(&self) -> InvitationStatus {
        self.status
    }

    /// Returns the invitation timestamp.
    #[must_use]
    pub const fn invited_at(&self) -> DateTime<Utc> {
        self.invited_at
    }

    /// Returns the response timestamp, if the invitation was answered.
    #[must_use]
    pub const fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    /// Returns whether the membership is an active (accepted) one.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == InvitationStatus::Accepted
    }

    /// Returns whether the membership grants active ownership.
    #[must_use]
    pub fn is_active_owner(&self) -> bool {
        self.role == TeamRole::Owner && self.is_active()
    }

    /// Accepts the invitation, keeping the role assigned at invite time.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::InvitationNotPending`] when the
    /// membership is not awaiting a response.
    pub fn accept(&mut self, clock: &impl Clock) -> Result<(), TeamDomainError> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Accepted;
        self.responded_at = Some(clock.utc());
        Ok(())
    }

    /// Checks that the invitation is still awaiting a response.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::InvitationNotPending`] otherwise.
    pub const fn ensure_pending(&self) -> Result<(), TeamDomainError> {
        match self.status {
            InvitationStatus::Pending => Ok(()),
            InvitationStatus::Accepted => Err(TeamDomainError::InvitationNotPending {
                found: InvitationStatus::Accepted,
            }),
        }
    }

    /// Overwrites the member's role.
    ///
    /// Last-owner protection is the service layer's concern.
    pub fn change_role(&mut self, role: TeamRole) {
        self.role = role;
    }
}
