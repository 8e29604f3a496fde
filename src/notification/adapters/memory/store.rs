//! In-memory notification store.
//!
//! Implements both the repository and the sink port so a single instance
//! can back emitting services and the inbox service in tests and
//! single-process embeddings.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{
        NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
        NotificationSink, NotificationSinkError, NotificationSinkResult, SendNotification,
    },
};

/// Thread-safe in-memory notification store and sink.
#[derive(Debug, Clone)]
pub struct InMemoryNotificationStore<C> {
    state: Arc<RwLock<HashMap<NotificationId, Notification>>>,
    clock: Arc<C>,
}

impl<C> InMemoryNotificationStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamping deliveries with the given clock.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

fn lock_error(err: impl std::fmt::Display) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> NotificationRepository for InMemoryNotificationStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }
        state.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::NotFound(notification.id()));
        }
        state.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(NotificationRepositoryError::NotFound(id))
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_by_recipient(
        &self,
        recipient: UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|notification| notification.recipient() == recipient)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<C> NotificationSink for InMemoryNotificationStore<C>
where
    C: Clock + Send + Sync,
{
    async fn send(&self, request: SendNotification) -> NotificationSinkResult<()> {
        let notification = Notification::new(
            request.recipient(),
            request.message(),
            request.kind(),
            request.related_entity_id(),
            &*self.clock,
        );
        self.create(&notification)
            .await
            .map_err(NotificationSinkError::delivery)
    }
}
