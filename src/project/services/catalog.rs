//! Service layer for project creation, retrieval, and maintenance.

use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::team::{
    domain::TeamId,
    ports::{TeamRepository, TeamRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The referenced team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),

    /// Team repository operation failed.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project catalogue orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, T, C>
where
    P: ProjectRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    teams: Arc<T>,
    clock: Arc<C>,
}

impl<P, T, C> ProjectService<P, T, C>
where
    P: ProjectRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, teams: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            teams,
            clock,
        }
    }

    /// Creates a project, optionally owned by a team.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] when the name fails
    /// validation, or [`ProjectServiceError::TeamNotFound`] when the team
    /// id does not resolve.
    pub async fn create_project(
        &self,
        name: impl Into<String>,
        team_id: Option<TeamId>,
    ) -> ProjectServiceResult<Project> {
        let name = ProjectName::new(name)?;
        if let Some(id) = team_id {
            self.ensure_team_exists(id).await?;
        }

        let project = Project::new(name, team_id, &*self.clock);
        self.projects.create(&project).await?;
        Ok(project)
    }

    /// Updates a project's name and team association.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] or
    /// [`ProjectServiceError::TeamNotFound`] when a reference does not
    /// resolve.
    pub async fn update_project(
        &self,
        project_id: ProjectId,
        new_name: impl Into<String>,
        team_id: Option<TeamId>,
    ) -> ProjectServiceResult<Project> {
        let name = ProjectName::new(new_name)?;
        let mut project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))?;

        if let Some(id) = team_id {
            self.ensure_team_exists(id).await?;
        }

        project.revise(name, team_id);
        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] when the id does
    /// not resolve.
    pub async fn delete_project(&self, project_id: ProjectId) -> ProjectServiceResult<()> {
        match self.projects.delete(project_id).await {
            Ok(()) => Ok(()),
            Err(ProjectRepositoryError::NotFound(id)) => {
                Err(ProjectServiceError::ProjectNotFound(id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Finds a project by identifier.
    ///
    /// Returns `Ok(None)` when no project has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Projects`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, project_id: ProjectId) -> ProjectServiceResult<Option<Project>> {
        Ok(self.projects.find_by_id(project_id).await?)
    }

    /// Returns all projects.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Projects`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.list_all().await?)
    }

    /// Returns all projects owned by the given team.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Projects`] when persistence lookup
    /// fails.
    pub async fn list_by_team(&self, team_id: TeamId) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.list_by_team(team_id).await?)
    }

    async fn ensure_team_exists(&self, team_id: TeamId) -> ProjectServiceResult<()> {
        self.teams
            .find_by_id(team_id)
            .await?
            .map(|_| ())
            .ok_or(ProjectServiceError::TeamNotFound(team_id))
    }
}
