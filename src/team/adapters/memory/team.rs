//! In-memory team repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::team::{
    domain::{Team, TeamId, TeamName},
    ports::{TeamRepository, TeamRepositoryError, TeamRepositoryResult},
};

/// Thread-safe in-memory team repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    state: Arc<RwLock<InMemoryTeamState>>,
}

#[derive(Debug, Default)]
struct InMemoryTeamState {
    teams: HashMap<TeamId, Team>,
    name_index: HashMap<TeamName, TeamId>,
}

impl InMemoryTeamRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TeamRepositoryError {
    TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.teams.contains_key(&team.id()) {
            return Err(TeamRepositoryError::DuplicateTeam(team.id()));
        }
        if state.name_index.contains_key(team.name()) {
            return Err(TeamRepositoryError::DuplicateTeamName(team.name().clone()));
        }

        state.name_index.insert(team.name().clone(), team.id());
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn update(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let previous = state
            .teams
            .get(&team.id())
            .ok_or(TeamRepositoryError::NotFound(team.id()))?
            .clone();

        if let Some(other) = state.name_index.get(team.name()) {
            if *other != team.id() {
                return Err(TeamRepositoryError::DuplicateTeamName(team.name().clone()));
            }
        }

        state.name_index.remove(previous.name());
        state.name_index.insert(team.name().clone(), team.id());
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn delete(&self, id: TeamId) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .teams
            .remove(&id)
            .ok_or(TeamRepositoryError::NotFound(id))?;
        state.name_index.remove(removed.name());
        Ok(())
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        let team = state
            .name_index
            .get(name)
            .and_then(|id| state.teams.get(id))
            .cloned();
        Ok(team)
    }

    async fn list_all(&self) -> TeamRepositoryResult<Vec<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.teams.values().cloned().collect())
    }
}
