//! Outbound notification delivery port.

use crate::identity::domain::UserId;
use crate::notification::domain::NotificationKind;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification delivery.
pub type NotificationSinkResult<T> = Result<T, NotificationSinkError>;

/// Request payload for delivering a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendNotification {
    recipient: UserId,
    message: String,
    kind: NotificationKind,
    related_entity_id: Option<uuid::Uuid>,
}

impl SendNotification {
    /// Creates a delivery request.
    #[must_use]
    pub fn new(recipient: UserId, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            recipient,
            message: message.into(),
            kind,
            related_entity_id: None,
        }
    }

    /// Sets the related entity reference (task id, team id, ...).
    #[must_use]
    pub const fn with_related_entity(mut self, id: uuid::Uuid) -> Self {
        self.related_entity_id = Some(id);
        self
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the related entity reference, if any.
    #[must_use]
    pub const fn related_entity_id(&self) -> Option<uuid::Uuid> {
        self.related_entity_id
    }
}

/// Fire-and-forget notification delivery contract.
///
/// Emitting services treat delivery failures as diagnostics, never as
/// operation failures.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers a notification to its recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSinkError`] when delivery fails; callers log
    /// and continue.
    async fn send(&self, request: SendNotification) -> NotificationSinkResult<()>;
}

/// Errors returned by notification sink implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationSinkError {
    /// Delivery-layer failure.
    #[error("notification delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationSinkError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
