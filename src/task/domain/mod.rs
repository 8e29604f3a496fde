//! Domain model for tasks.
//!
//! The task domain models the task aggregate, its priority/status/
//! visibility enumerations, and the pure visibility rule, keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::{
    ParseTaskPriorityError, ParseTaskStatusError, ParseTaskVisibilityError, TaskDomainError,
};
pub use ids::TaskId;
pub use task::{
    PersistedTaskData, Task, TaskDraft, TaskPriority, TaskRevision, TaskStatus, TaskTitle,
    TaskVisibility,
};
