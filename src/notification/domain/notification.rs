//! Notification entity and kind enumeration.

use super::{NotificationId, ParseNotificationKindError};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Free-form system message.
    General,
    /// The recipient was assigned a task.
    TaskAssignment,
    /// The recipient was invited to a team.
    TeamInvitation,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::TaskAssignment => "task_assignment",
            Self::TeamInvitation => "team_invitation",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "general" => Ok(Self::General),
            "task_assignment" => Ok(Self::TaskAssignment),
            "team_invitation" => Ok(Self::TeamInvitation),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

/// Notification delivered to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    message: String,
    kind: NotificationKind,
    related_entity_id: Option<Uuid>,
    sent_at: DateTime<Utc>,
    read: bool,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted notification identifier.
    pub id: NotificationId,
    /// Persisted recipient.
    pub recipient: UserId,
    /// Persisted message text.
    pub message: String,
    /// Persisted notification kind.
    pub kind: NotificationKind,
    /// Persisted related entity reference, if any.
    pub related_entity_id: Option<Uuid>,
    /// Persisted delivery timestamp.
    pub sent_at: DateTime<Utc>,
    /// Persisted read flag.
    pub read: bool,
}

impl Notification {
    /// Creates an unread notification stamped with the current clock time.
    #[must_use]
    pub fn new(
        recipient: UserId,
        message: impl Into<String>,
        kind: NotificationKind,
        related_entity_id: Option<Uuid>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            message: message.into(),
            kind,
            related_entity_id,
            sent_at: clock.utc(),
            read: false,
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            recipient: data.recipient,
            message: data.message,
            kind: data.kind,
            related_entity_id: data.related_entity_id,
            sent_at: data.sent_at,
            read: data.read,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
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
    ///
    /// Carries the task id for assignments and the team id for
    /// invitations.
    #[must_use]
    pub const fn related_entity_id(&self) -> Option<Uuid> {
        self.related_entity_id
    }

    /// Returns the delivery timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns whether the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Marks the notification as read. Idempotent.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
