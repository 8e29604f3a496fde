//! Team aggregate root and validated team name.

use super::{TeamDomainError, TeamId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a team name, matching the original schema column.
const MAX_NAME_LENGTH: usize = 100;

/// Validated, trimmed team name.
///
/// Team names are unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a validated team name.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyTeamName`] when the value is empty
    /// after trimming, or [`TeamDomainError::TeamNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TeamDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(TeamDomainError::EmptyTeamName);
        }
        if normalized.len() > MAX_NAME_LENGTH {
            return Err(TeamDomainError::TeamNameTooLong(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the team name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TeamName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Team aggregate root.
///
/// A team owns memberships through the
/// [`TeamMembership`](super::TeamMembership) edge entity; the aggregate
/// itself carries only identity and the unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: TeamName,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted team aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted team identifier.
    pub id: TeamId,
    /// Persisted team name.
    pub name: TeamName,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new team.
    #[must_use]
    pub fn new(name: TeamName, clock: &impl Clock) -> Self {
        Self {
            id: TeamId::new(),
            name,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            created_at: data.created_at,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the team name.
    ///
    /// Uniqueness against other teams is the service layer's concern.
    pub fn rename(&mut self, name: TeamName) {
        self.name = name;
    }
}
