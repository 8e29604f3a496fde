//! Task aggregate root, its enumerations, and the visibility rule.

use super::{
    ParseTaskPriorityError, ParseTaskStatusError, ParseTaskVisibilityError, TaskDomainError,
    TaskId,
};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Progress state of a task.
///
/// There is no enforced transition graph: the creator may move a task
/// between any two states. New tasks always start as [`Self::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished.
    Completed,
    /// Waiting on something external.
    Blocked,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "blocked" => Ok(Self::Blocked),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Access scope of a task, independent of team membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskVisibility {
    /// Visible to every user.
    Public,
    /// Visible to users sharing a team with the creator.
    Restricted,
    /// Visible to the creator only.
    Private,
}

impl TaskVisibility {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Restricted => "restricted",
            Self::Private => "private",
        }
    }
}

impl TryFrom<&str> for TaskVisibility {
    type Error = ParseTaskVisibilityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "public" => Ok(Self::Public),
            "restricted" => Ok(Self::Restricted),
            "private" => Ok(Self::Private),
            _ => Err(ParseTaskVisibilityError(value.to_owned())),
        }
    }
}

/// Validated, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameter object for creating a new task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: TaskTitle,
    /// Free-form description, if any.
    pub description: Option<String>,
    /// Due timestamp, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Urgency level.
    pub priority: TaskPriority,
    /// Assigned user, if any.
    pub assignee: Option<UserId>,
    /// Owning project, if any.
    pub project_id: Option<ProjectId>,
    /// Access scope.
    pub visibility: TaskVisibility,
    /// Authoring user.
    pub creator: UserId,
}

/// Replacement values for every caller-mutable task field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRevision {
    /// New title.
    pub title: TaskTitle,
    /// New description, if any.
    pub description: Option<String>,
    /// New due timestamp, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// New urgency level.
    pub priority: TaskPriority,
    /// New progress state.
    pub status: TaskStatus,
    /// New assignee, if any.
    pub assignee: Option<UserId>,
    /// New owning project, if any.
    pub project_id: Option<ProjectId>,
    /// New access scope.
    pub visibility: TaskVisibility,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    status: TaskStatus,
    assignee: Option<UserId>,
    project_id: Option<ProjectId>,
    visibility: TaskVisibility,
    creator: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due timestamp, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Persisted urgency level.
    pub priority: TaskPriority,
    /// Persisted progress state.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted owning project, if any.
    pub project_id: Option<ProjectId>,
    /// Persisted access scope.
    pub visibility: TaskVisibility,
    /// Persisted author.
    pub creator: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task.
    ///
    /// The progress state always starts as [`TaskStatus::Pending`],
    /// whatever the caller intended.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            due_at: draft.due_at,
            priority: draft.priority,
            status: TaskStatus::Pending,
            assignee: draft.assignee,
            project_id: draft.project_id,
            visibility: draft.visibility,
            creator: draft.creator,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_at: data.due_at,
            priority: data.priority,
            status: data.status,
            assignee: data.assignee,
            project_id: data.project_id,
            visibility: data.visibility,
            creator: data.creator,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the urgency level.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the progress state.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the access scope.
    #[must_use]
    pub const fn visibility(&self) -> TaskVisibility {
        self.visibility
    }

    /// Returns the authoring user.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Decides whether the task is visible to the given viewer.
    ///
    /// The creator and the assignee always see the task. Everyone else is
    /// governed by the access scope: public tasks are visible to all,
    /// restricted tasks require `shares_team_with_creator`, private tasks
    /// are hidden.
    #[must_use]
    pub fn visible_to(&self, viewer: UserId, shares_team_with_creator: bool) -> bool {
        if self.creator == viewer {
            return true;
        }
        if self.assignee == Some(viewer) {
            return true;
        }
        match self.visibility {
            TaskVisibility::Public => true,
            TaskVisibility::Restricted => shares_team_with_creator,
            TaskVisibility::Private => false,
        }
    }

    /// Overwrites every caller-mutable field.
    ///
    /// Creator-only authorisation is the service layer's concern; the
    /// creator and creation timestamp are immutable.
    pub fn revise(&mut self, revision: TaskRevision, clock: &impl Clock) {
        self.title = revision.title;
        self.description = revision.description;
        self.due_at = revision.due_at;
        self.priority = revision.priority;
        self.status = revision.status;
        self.assignee = revision.assignee;
        self.project_id = revision.project_id;
        self.visibility = revision.visibility;
        self.updated_at = clock.utc();
    }
}
