// src/application/ports/request_state.rs
use crate::domain::token::TokenExchangeOutcome;

/// Last-write-wins cell holding the most recent exchange outcome.
pub trait RequestStateTracker: Send + Sync {
    fn set(&self, outcome: TokenExchangeOutcome);
    fn get(&self) -> TokenExchangeOutcome;
}
