//! Service layer for reading and maintaining a user's notifications.

use crate::identity::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for inbox operations.
#[derive(Debug, Error)]
pub enum InboxServiceError {
    /// The referenced notification does not exist.
    #[error("notification not found: {0}")]
    NotificationNotFound(NotificationId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

/// Result type for inbox service operations.
pub type InboxServiceResult<T> = Result<T, InboxServiceError>;

/// Notification inbox orchestration service.
#[derive(Clone)]
pub struct InboxService<R>
where
    R: NotificationRepository,
{
    notifications: Arc<R>,
}

impl<R> InboxService<R>
where
    R: NotificationRepository,
{
    /// Creates a new inbox service.
    #[must_use]
    pub const fn new(notifications: Arc<R>) -> Self {
        Self { notifications }
    }

    /// Returns the recipient's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_for_recipient(
        &self,
        recipient: UserId,
    ) -> InboxServiceResult<Vec<Notification>> {
        let mut notifications = self.notifications.list_by_recipient(recipient).await?;
        notifications.sort_by_key(|notification| std::cmp::Reverse(notification.sent_at()));
        Ok(notifications)
    }

    /// Marks a notification as read.
    ///
    /// Idempotent: marking an already-read notification succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::NotificationNotFound`] when the id does
    /// not resolve.
    pub async fn mark_read(&self, id: NotificationId) -> InboxServiceResult<Notification> {
        let mut notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or(InboxServiceError::NotificationNotFound(id))?;
        notification.mark_read();
        self.notifications.update(&notification).await?;
        Ok(notification)
    }

    /// Deletes a notification.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::NotificationNotFound`] when the id does
    /// not resolve.
    pub async fn delete(&self, id: NotificationId) -> InboxServiceResult<()> {
        match self.notifications.delete(id).await {
            Ok(()) => Ok(()),
            Err(NotificationRepositoryError::NotFound(missing)) => {
                Err(InboxServiceError::NotificationNotFound(missing))
            }
            Err(err) => Err(err.into()),
        }
    }
}
