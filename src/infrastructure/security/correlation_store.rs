// src/infrastructure/security/correlation_store.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::{correlation::CorrelationStore, time::Clock};
use crate::domain::authorization::{PendingAuthorization, StateToken};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Process-local correlation store. Every operation holds the one mutex for
/// its whole duration, which is what makes `take_if_present` single-use.
pub struct InMemoryCorrelationStore {
    // state -> pending authorization
    inner: Mutex<HashMap<String, PendingAuthorization>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCorrelationStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, PendingAuthorization>> {
        // A panicking holder cannot leave the map half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sweep(entries: &mut HashMap<String, PendingAuthorization>, now: DateTime<Utc>) -> usize {
        let before = entries.len();
        entries.retain(|_, pending| !pending.is_expired(now));
        before - entries.len()
    }
}

#[async_trait]
impl CorrelationStore for InMemoryCorrelationStore {
    async fn put(&self, pending: PendingAuthorization) -> ApplicationResult<()> {
        let now = self.clock.now();
        let mut entries = self.entries();
        Self::sweep(&mut entries, now);

        match entries.entry(pending.state.as_str().to_owned()) {
            Entry::Occupied(_) => {
                tracing::error!("duplicate state token generated; entropy source is suspect");
                Err(ApplicationError::integrity("state token collision"))
            }
            Entry::Vacant(slot) => {
                slot.insert(pending);
                Ok(())
            }
        }
    }

    async fn take_if_present(
        &self,
        state: &StateToken,
    ) -> ApplicationResult<Option<PendingAuthorization>> {
        let now = self.clock.now();
        let taken = self.entries().remove(state.as_str());
        Ok(taken.filter(|pending| !pending.is_expired(now)))
    }

    async fn expire(&self, now: DateTime<Utc>) -> ApplicationResult<usize> {
        Ok(Self::sweep(&mut self.entries(), now))
    }

    async fn len(&self) -> ApplicationResult<usize> {
        Ok(self.entries().len())
    }
}

/// Periodically evict pending authorizations whose TTL has passed.
pub fn spawn_expiry_sweeper(
    store: Arc<dyn CorrelationStore>,
    clock: Arc<dyn Clock>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match store.expire(clock.now()).await {
                Ok(0) => {}
                Ok(evicted) => tracing::debug!(evicted, "expired pending authorizations"),
                Err(err) => tracing::warn!(error = %err, "pending authorization sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authorization::CodeVerifier;
    use chrono::Duration as ChronoDuration;
    use std::collections::BTreeMap;
    use std::sync::RwLock;

    struct ManualClock(RwLock<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(RwLock::new(Utc::now())))
        }

        fn advance(&self, by: ChronoDuration) {
            let mut now = self.0.write().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.read().unwrap()
        }
    }

    fn pending(state: &str, now: DateTime<Utc>) -> PendingAuthorization {
        PendingAuthorization::new(
            StateToken::parse(state).unwrap(),
            CodeVerifier::new("v".repeat(64)).unwrap(),
            BTreeMap::new(),
            now,
            ChronoDuration::minutes(10),
        )
    }

    #[tokio::test]
    async fn take_is_single_use() {
        let clock = ManualClock::new();
        let store = InMemoryCorrelationStore::new(clock.clone());
        store.put(pending("S", clock.now())).await.unwrap();

        let state = StateToken::parse("S").unwrap();
        let first = store.take_if_present(&state).await.unwrap();
        assert!(first.is_some());
        assert!(store.take_if_present(&state).await.unwrap().is_none());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_state_is_none() {
        let clock = ManualClock::new();
        let store = InMemoryCorrelationStore::new(clock);
        let state = StateToken::parse("nope").unwrap();
        assert!(store.take_if_present(&state).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn live_collision_is_an_integrity_error() {
        let clock = ManualClock::new();
        let store = InMemoryCorrelationStore::new(clock.clone());
        let original = pending("S", clock.now());
        let original_verifier = original.code_verifier.clone();
        store.put(original).await.unwrap();

        let mut duplicate = pending("S", clock.now());
        duplicate.code_verifier = CodeVerifier::new("w".repeat(64)).unwrap();
        let err = store.put(duplicate).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Integrity(_)));

        let kept = store
            .take_if_present(&StateToken::parse("S").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.code_verifier, original_verifier);
    }

    #[tokio::test]
    async fn expired_entry_is_not_returned() {
        let clock = ManualClock::new();
        let store = InMemoryCorrelationStore::new(clock.clone());
        store.put(pending("S", clock.now())).await.unwrap();

        clock.advance(ChronoDuration::minutes(11));
        let state = StateToken::parse("S").unwrap();
        assert!(store.take_if_present(&state).await.unwrap().is_none());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn put_sweeps_expired_entries() {
        let clock = ManualClock::new();
        let store = InMemoryCorrelationStore::new(clock.clone());
        store.put(pending("old", clock.now())).await.unwrap();

        clock.advance(ChronoDuration::minutes(15));
        store.put(pending("new", clock.now())).await.unwrap();
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn expire_reports_evictions() {
        let clock = ManualClock::new();
        let store = InMemoryCorrelationStore::new(clock.clone());
        let now = clock.now();
        store.put(pending("a", now)).await.unwrap();
        store.put(pending("b", now)).await.unwrap();

        assert_eq!(store.expire(now).await.unwrap(), 0);
        assert_eq!(store.expire(now + ChronoDuration::minutes(10)).await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_takes_yield_exactly_one_winner() {
        let clock = ManualClock::new();
        let store = Arc::new(InMemoryCorrelationStore::new(clock.clone()));
        store.put(pending("race", clock.now())).await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let state = StateToken::parse("race").unwrap();
                    store.take_if_present(&state).await.unwrap().is_some()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_in_background() {
        let clock = ManualClock::new();
        let store: Arc<dyn CorrelationStore> =
            Arc::new(InMemoryCorrelationStore::new(clock.clone()));
        store.put(pending("S", clock.now())).await.unwrap();
        clock.advance(ChronoDuration::minutes(20));

        let handle = spawn_expiry_sweeper(Arc::clone(&store), clock.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(store.len().await.unwrap(), 0);
        handle.abort();
    }
}
