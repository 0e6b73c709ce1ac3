use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{
    request_state::RequestStateTracker,
    token_endpoint::{TokenEndpoint, TokenEndpointResponse},
};
use crate::domain::token::{GrantKind, TokenExchangeOutcome, TokenGrant};

/// Runs a grant against the token endpoint and records the classified
/// outcome. Never retries.
pub struct TokenExchanger {
    endpoint: Arc<dyn TokenEndpoint>,
    tracker: Arc<dyn RequestStateTracker>,
}

impl TokenExchanger {
    pub fn new(endpoint: Arc<dyn TokenEndpoint>, tracker: Arc<dyn RequestStateTracker>) -> Self {
        Self { endpoint, tracker }
    }

    pub async fn exchange(&self, grant: TokenGrant) -> TokenExchangeOutcome {
        let kind = grant.kind();
        self.tracker.set(TokenExchangeOutcome::Loading);

        let response = self.endpoint.request_token(&grant).await;
        let outcome = classify(kind, response);

        self.tracker.set(outcome.clone());
        outcome
    }
}

/// Map a raw token-endpoint response onto the outcome taxonomy:
/// 2xx with a JSON body is a success, 400/401 is a known failure carrying
/// the provider's body, everything else is unknown.
pub fn classify(kind: GrantKind, response: TokenEndpointResponse) -> TokenExchangeOutcome {
    match response {
        TokenEndpointResponse::Status { status, body } if (200..300).contains(&status) => {
            match serde_json::from_str::<Value>(&body) {
                Ok(payload) => {
                    tracing::info!(grant = kind.as_str(), status, "token request succeeded");
                    TokenExchangeOutcome::success(kind, payload)
                }
                Err(err) => {
                    tracing::error!(
                        grant = kind.as_str(),
                        status,
                        error = %err,
                        "token endpoint returned a success status with an unreadable body"
                    );
                    TokenExchangeOutcome::unknown_error(kind)
                }
            }
        }
        TokenEndpointResponse::Status { status, body } if matches!(status, 400 | 401) => {
            let payload = serde_json::from_str::<Value>(&body).unwrap_or_else(|_| Value::String(body));
            tracing::warn!(grant = kind.as_str(), status, error_body = %payload, "token request rejected");
            TokenExchangeOutcome::known_error(kind, payload)
        }
        TokenEndpointResponse::Status { status, body } => {
            tracing::error!(
                grant = kind.as_str(),
                status,
                body = %body,
                "unexpected status from token endpoint"
            );
            TokenExchangeOutcome::unknown_error(kind)
        }
        TokenEndpointResponse::Transport(reason) => {
            tracing::error!(grant = kind.as_str(), reason = %reason, "token request did not complete");
            TokenExchangeOutcome::unknown_error(kind)
        }
    }
}
