use std::sync::Arc;

use crate::application::ports::request_state::RequestStateTracker;
use crate::domain::token::TokenExchangeOutcome;

/// Read side of the request-state tracker.
pub struct TokenStateQueryService {
    tracker: Arc<dyn RequestStateTracker>,
}

impl TokenStateQueryService {
    pub fn new(tracker: Arc<dyn RequestStateTracker>) -> Self {
        Self { tracker }
    }

    /// Most recent exchange outcome. With concurrent flows this is whichever
    /// finished last, not necessarily the caller's own.
    pub fn latest(&self) -> TokenExchangeOutcome {
        self.tracker.get()
    }
}
