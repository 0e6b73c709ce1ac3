use std::sync::Arc;

use chrono::Duration;

use super::exchange::TokenExchanger;
use crate::application::ports::{EntropySource, correlation::CorrelationStore, time::Clock};

/// Static client registration with the provider.
#[derive(Debug, Clone)]
pub struct OAuthClientSettings {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    /// Provider origin, e.g. `https://airtable.com`, without a trailing slash.
    pub provider_base_url: String,
    pub authorization_ttl: Duration,
}

pub struct OAuthCommandService {
    pub(super) settings: Arc<OAuthClientSettings>,
    pub(super) correlation_store: Arc<dyn CorrelationStore>,
    pub(super) exchanger: Arc<TokenExchanger>,
    pub(super) entropy: Arc<dyn EntropySource>,
    pub(super) clock: Arc<dyn Clock>,
}

impl OAuthCommandService {
    pub fn new(
        settings: Arc<OAuthClientSettings>,
        correlation_store: Arc<dyn CorrelationStore>,
        exchanger: Arc<TokenExchanger>,
        entropy: Arc<dyn EntropySource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            correlation_store,
            exchanger,
            entropy,
            clock,
        }
    }
}
