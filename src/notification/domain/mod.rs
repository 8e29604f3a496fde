//! Domain model for notifications.

mod error;
mod ids;
mod notification;

pub use error::ParseNotificationKindError;
pub use ids::NotificationId;
pub use notification::{Notification, NotificationKind, PersistedNotificationData};
