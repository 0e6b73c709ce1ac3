// tests/support/mocks.rs
use airtable_oauth_client::application::ports::{
    EntropySource,
    time::Clock,
    token_endpoint::{TokenEndpoint, TokenEndpointResponse},
};
use airtable_oauth_client::domain::token::TokenGrant;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Token endpoint that replays queued responses and records every grant.
#[derive(Default)]
pub struct ScriptedTokenEndpoint {
    responses: Mutex<VecDeque<TokenEndpointResponse>>,
    calls: Mutex<Vec<TokenGrant>>,
}

impl ScriptedTokenEndpoint {
    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(TokenEndpointResponse::Status {
                status,
                body: body.to_string(),
            });
    }

    pub fn fail_transport(&self, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(TokenEndpointResponse::Transport(reason.to_string()));
    }

    pub fn calls(&self) -> Vec<TokenGrant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TokenEndpoint for ScriptedTokenEndpoint {
    async fn request_token(&self, grant: &TokenGrant) -> TokenEndpointResponse {
        self.calls.lock().unwrap().push(grant.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| TokenEndpointResponse::Transport("no scripted response".into()))
    }
}

/// Deterministic but never-repeating bytes.
#[derive(Default)]
pub struct CountingEntropy(AtomicU64);

impl EntropySource for CountingEntropy {
    fn fill(&self, dest: &mut [u8]) {
        let seed = self.0.fetch_add(1, Ordering::SeqCst).to_le_bytes();
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = seed[i % seed.len()] ^ (i as u8);
        }
    }
}

/// Always the same bytes, so every state token collides.
pub struct StuckEntropy;

impl EntropySource for StuckEntropy {
    fn fill(&self, dest: &mut [u8]) {
        dest.fill(0xAB);
    }
}

pub struct DummyClock;

impl Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
