//! Team affiliation port consumed by the visibility filter.

use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for affiliation queries.
pub type AffiliationResult<T> = Result<T, AffiliationError>;

/// Answers whether two users share an active team.
///
/// Keeps the task context ignorant of how memberships are stored; the
/// team context supplies the canonical implementation.
#[async_trait]
pub trait TeamAffiliation: Send + Sync {
    /// Returns whether both users hold accepted memberships of at least
    /// one common team.
    ///
    /// # Errors
    ///
    /// Returns [`AffiliationError`] when the underlying lookup fails.
    async fn users_share_team(&self, a: UserId, b: UserId) -> AffiliationResult<bool>;
}

/// Errors returned by affiliation implementations.
#[derive(Debug, Clone, Error)]
pub enum AffiliationError {
    /// Lookup-layer failure.
    #[error("affiliation lookup error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl AffiliationError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
