// src/application/ports/correlation.rs
use crate::application::ApplicationResult;
use crate::domain::authorization::{PendingAuthorization, StateToken};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Holds authorization requests between the redirect to the provider and
/// the provider's callback.
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Register a pending authorization.
    ///
    /// A live entry under the same state is an integrity error and is left
    /// untouched; an expired one may be replaced.
    async fn put(&self, pending: PendingAuthorization) -> ApplicationResult<()>;

    /// Atomically remove and return the entry for `state`. Concurrent callers
    /// presenting the same state see `Some` at most once between them.
    /// Expired entries are dropped and reported as `None`.
    async fn take_if_present(
        &self,
        state: &StateToken,
    ) -> ApplicationResult<Option<PendingAuthorization>>;

    /// Remove every entry expired at `now`, returning how many were dropped.
    async fn expire(&self, now: DateTime<Utc>) -> ApplicationResult<usize>;

    async fn len(&self) -> ApplicationResult<usize>;
}
