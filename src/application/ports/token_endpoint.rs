// src/application/ports/token_endpoint.rs
use crate::domain::token::TokenGrant;
use async_trait::async_trait;

/// What came back from one POST to the token endpoint, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenEndpointResponse {
    Status { status: u16, body: String },
    /// No HTTP response at all: connect failure, timeout, broken body.
    Transport(String),
}

#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    async fn request_token(&self, grant: &TokenGrant) -> TokenEndpointResponse;
}
