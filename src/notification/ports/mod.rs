//! Port contracts for the notification context.
//!
//! Ports define infrastructure-agnostic interfaces used by notification
//! services and by the team/task services that emit notifications.

pub mod repository;
pub mod sink;

pub use repository::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
pub use sink::{NotificationSink, NotificationSinkError, NotificationSinkResult, SendNotification};
