// src/infrastructure/state/request_state.rs
use crate::application::ports::request_state::RequestStateTracker;
use crate::domain::token::TokenExchangeOutcome;
use std::sync::{PoisonError, RwLock};

#[derive(Default)]
pub struct InMemoryRequestStateTracker {
    latest: RwLock<TokenExchangeOutcome>,
}

impl InMemoryRequestStateTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestStateTracker for InMemoryRequestStateTracker {
    fn set(&self, outcome: TokenExchangeOutcome) {
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    fn get(&self) -> TokenExchangeOutcome {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
