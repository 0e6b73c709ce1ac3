// src/domain/authorization/entity.rs
use crate::domain::authorization::value_objects::{CodeVerifier, StateToken};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// An authorization request that has been sent to the provider and is
/// waiting for its callback.
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    pub state: StateToken,
    pub code_verifier: CodeVerifier,
    /// Free-form caller data carried through the round trip (e.g. a user id).
    pub metadata: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingAuthorization {
    pub fn new(
        state: StateToken,
        code_verifier: CodeVerifier,
        metadata: BTreeMap<String, String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            state,
            code_verifier,
            metadata,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
