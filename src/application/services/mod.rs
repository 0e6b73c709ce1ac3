// src/application/services/mod.rs
use std::sync::Arc;

use crate::application::{
    commands::oauth::{OAuthClientSettings, OAuthCommandService, TokenExchanger},
    ports::{
        EntropySource, correlation::CorrelationStore, request_state::RequestStateTracker,
        time::Clock, token_endpoint::TokenEndpoint,
    },
    queries::token_state::TokenStateQueryService,
};

pub struct ApplicationServices {
    pub oauth_commands: Arc<OAuthCommandService>,
    pub token_state_queries: Arc<TokenStateQueryService>,
    correlation_store: Arc<dyn CorrelationStore>,
}

impl ApplicationServices {
    pub fn new(
        settings: OAuthClientSettings,
        correlation_store: Arc<dyn CorrelationStore>,
        token_endpoint: Arc<dyn TokenEndpoint>,
        request_state: Arc<dyn RequestStateTracker>,
        entropy: Arc<dyn EntropySource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let exchanger = Arc::new(TokenExchanger::new(
            token_endpoint,
            Arc::clone(&request_state),
        ));

        let oauth_commands = Arc::new(OAuthCommandService::new(
            Arc::new(settings),
            Arc::clone(&correlation_store),
            exchanger,
            entropy,
            clock,
        ));

        let token_state_queries = Arc::new(TokenStateQueryService::new(request_state));

        Self {
            oauth_commands,
            token_state_queries,
            correlation_store,
        }
    }

    pub fn correlation_store(&self) -> Arc<dyn CorrelationStore> {
        Arc::clone(&self.correlation_store)
    }
}
