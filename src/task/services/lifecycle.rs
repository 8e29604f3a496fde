//! Service layer for task creation, mutation, deletion, and filtered
//! reads.

use crate::identity::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::notification::{
    domain::NotificationKind,
    ports::{NotificationSink, SendNotification},
};
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{
        Task, TaskDomainError, TaskDraft, TaskId, TaskPriority, TaskRevision, TaskStatus,
        TaskTitle, TaskVisibility,
    },
    ports::{
        AffiliationError, TaskRepository, TaskRepositoryError, TeamAffiliation,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    assignee: Option<UserId>,
    project_id: Option<ProjectId>,
    visibility: TaskVisibility,
    creator: UserId,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        priority: TaskPriority,
        visibility: TaskVisibility,
        creator: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_at: None,
            priority,
            assignee: None,
            project_id: None,
            visibility,
            creator,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Assigns the task to a user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Associates the task with a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Request payload for replacing a task's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    caller: UserId,
    title: String,
    description: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    status: TaskStatus,
    assignee: Option<UserId>,
    project_id: Option<ProjectId>,
    visibility: TaskVisibility,
}

impl UpdateTaskRequest {
    /// Creates a request with required update fields.
    ///
    /// Optional fields omitted from the request are cleared on the task;
    /// an update replaces every mutable field.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        caller: UserId,
        title: impl Into<String>,
        priority: TaskPriority,
        status: TaskStatus,
        visibility: TaskVisibility,
    ) -> Self {
        Self {
            task_id,
            caller,
            title: title.into(),
            description: None,
            due_at: None,
            priority,
            status,
            assignee: None,
            project_id: None,
            visibility,
        }
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the new assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the new project association.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The referenced user (creator or assignee) does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The caller is not the task's creator.
    ///
    /// Only the creator may mutate or delete a task; assignees may not.
    #[error("user {user_id} is not the creator of task {task_id}")]
    NotTaskCreator {
        /// The task being mutated.
        task_id: TaskId,
        /// The rejected caller.
        user_id: UserId,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),

    /// Affiliation lookup failed.
    #[error(transparent)]
    Affiliation(#[from] AffiliationError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskService<T, U, P, A, N, C>
where
    T: TaskRepository,
    U: UserRepository,
    P: ProjectRepository,
    A: TeamAffiliation,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    projects: Arc<P>,
    affiliation: Arc<A>,
    notifications: Arc<N>,
    clock: Arc<C>,
}

impl<T, U, P, A, N, C> TaskService<T, U, P, A, N, C>
where
    T: TaskRepository,
    U: UserRepository,
    P: ProjectRepository,
    A: TeamAffiliation,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        users: Arc<U>,
        projects: Arc<P>,
        affiliation: Arc<A>,
        notifications: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            users,
            projects,
            affiliation,
            notifications,
            clock,
        }
    }

    /// Creates a task.
    ///
    /// The progress state always starts as pending. When the task is
    /// assigned to someone other than the creator, the assignee is
    /// notified.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title fails
    /// validation, [`TaskServiceError::UserNotFound`] when the creator or
    /// assignee id does not resolve, or
    /// [`TaskServiceError::ProjectNotFound`] when the project id does not
    /// resolve.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let creator = self.find_user_or_error(request.creator).await?;
        if let Some(assignee) = request.assignee {
            self.find_user_or_error(assignee).await?;
        }
        if let Some(project_id) = request.project_id {
            self.ensure_project_exists(project_id).await?;
        }

        let task = Task::new(
            TaskDraft {
                title,
                description: request.description,
                due_at: request.due_at,
                priority: request.priority,
                assignee: request.assignee,
                project_id: request.project_id,
                visibility: request.visibility,
                creator: creator.id(),
            },
            &*self.clock,
        );
        self.tasks.create(&task).await?;

        if let Some(assignee) = task.assignee() {
            if assignee != creator.id() {
                let message = format!(
                    "You have been assigned to a new task: '{}' by {}.",
                    task.title(),
                    creator.username()
                );
                self.notify_assignment(assignee, message, task.id()).await;
            }
        }
        Ok(task)
    }

    /// Replaces a task's mutable fields.
    ///
    /// Only the creator may update a task, not even the assignee. When
    /// the update assigns the task to a different user, the new assignee
    /// is notified; unassignment and no-op reassignment stay silent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task id does
    /// not resolve, [`TaskServiceError::NotTaskCreator`] when the caller
    /// is not the creator, or a not-found variant when the new assignee or
    /// project does not resolve.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let mut task = self.find_task_or_error(request.task_id).await?;
        if task.creator() != request.caller {
            return Err(TaskServiceError::NotTaskCreator {
                task_id: task.id(),
                user_id: request.caller,
            });
        }

        let title = TaskTitle::new(request.title)?;
        if let Some(assignee) = request.assignee {
            self.find_user_or_error(assignee).await?;
        }
        if let Some(project_id) = request.project_id {
            self.ensure_project_exists(project_id).await?;
        }

        let previous_assignee = task.assignee();
        task.revise(
            TaskRevision {
                title,
                description: request.description,
                due_at: request.due_at,
                priority: request.priority,
                status: request.status,
                assignee: request.assignee,
                project_id: request.project_id,
                visibility: request.visibility,
            },
            &*self.clock,
        );
        self.tasks.update(&task).await?;

        if let Some(assignee) = task.assignee() {
            if previous_assignee != Some(assignee) {
                match self.users.find_by_id(request.caller).await? {
                    Some(caller) => {
                        let message = format!(
                            "You have been assigned to task: '{}' by {}.",
                            task.title(),
                            caller.username()
                        );
                        self.notify_assignment(assignee, message, task.id()).await;
                    }
                    None => {
                        tracing::warn!(
                            task_id = %task.id(),
                            caller = %request.caller,
                            "skipping assignment notification: caller account no longer resolves",
                        );
                    }
                }
            }
        }
        Ok(task)
    }

    /// Deletes a task. Only the creator may delete.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the id does not
    /// resolve, or [`TaskServiceError::NotTaskCreator`] when the caller is
    /// not the creator.
    pub async fn delete_task(&self, task_id: TaskId, caller: UserId) -> TaskServiceResult<()> {
        let task = self.find_task_or_error(task_id).await?;
        if task.creator() != caller {
            return Err(TaskServiceError::NotTaskCreator {
                task_id,
                user_id: caller,
            });
        }
        self.tasks.delete(task_id).await?;
        Ok(())
    }

    /// Finds a task by identifier, without visibility filtering.
    ///
    /// Returns `Ok(None)` when no task has the given id. Callers serving
    /// other viewers apply [`Task::visible_to`] themselves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Tasks`] when persistence lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Returns the tasks assigned to `assignee` that are visible to
    /// `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Tasks`] or
    /// [`TaskServiceError::Affiliation`] when a lookup fails.
    pub async fn tasks_assigned_to(
        &self,
        assignee: UserId,
        viewer: UserId,
    ) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.tasks.list_by_assignee(assignee).await?;
        self.filter_visible(tasks, viewer).await
    }

    /// Returns every task visible to the viewer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Tasks`] or
    /// [`TaskServiceError::Affiliation`] when a lookup fails.
    pub async fn visible_tasks(&self, viewer: UserId) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.tasks.list_all().await?;
        self.filter_visible(tasks, viewer).await
    }

    async fn filter_visible(
        &self,
        tasks: Vec<Task>,
        viewer: UserId,
    ) -> TaskServiceResult<Vec<Task>> {
        let mut visible = Vec::with_capacity(tasks.len());
        for task in tasks {
            if self.is_visible(&task, viewer).await? {
                visible.push(task);
            }
        }
        Ok(visible)
    }

    /// Resolves the visibility rule for one task, consulting the
    /// affiliation port only when a restricted task requires it.
    async fn is_visible(&self, task: &Task, viewer: UserId) -> TaskServiceResult<bool> {
        if task.visible_to(viewer, false) {
            return Ok(true);
        }
        if task.visibility() == TaskVisibility::Restricted {
            let shares = self
                .affiliation
                .users_share_team(viewer, task.creator())
                .await?;
            return Ok(task.visible_to(viewer, shares));
        }
        Ok(false)
    }

    /// Fire-and-forget assignment notification; failures are logged, not
    /// surfaced.
    async fn notify_assignment(&self, assignee: UserId, message: String, task_id: TaskId) {
        let request = SendNotification::new(assignee, message, NotificationKind::TaskAssignment)
            .with_related_entity(task_id.into_inner());
        if let Err(err) = self.notifications.send(request).await {
            tracing::warn!(
                assignee = %assignee,
                task_id = %task_id,
                error = %err,
                "failed to deliver task assignment notification",
            );
        }
    }

    async fn find_user_or_error(&self, user_id: UserId) -> TaskServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(TaskServiceError::UserNotFound(user_id))
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    async fn ensure_project_exists(&self, project_id: ProjectId) -> TaskServiceResult<()> {
        self.projects
            .find_by_id(project_id)
            .await?
            .map(|_| ())
            .ok_or(TaskServiceError::ProjectNotFound(project_id))
    }
}
