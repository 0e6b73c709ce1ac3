// src/infrastructure/provider/token_client.rs
use crate::application::ports::token_endpoint::{TokenEndpoint, TokenEndpointResponse};
use crate::domain::token::TokenGrant;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use std::time::Duration;

pub const TOKEN_PATH: &str = "/oauth2/v1/token";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `Basic base64(client_id:client_secret)`.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

/// Token endpoint reached over HTTPS with reqwest.
///
/// Confidential clients (non-empty secret) also authenticate with a Basic
/// header; `client_id` stays in the form body either way.
pub struct ReqwestTokenEndpoint {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    authorization: Option<HeaderValue>,
}

impl ReqwestTokenEndpoint {
    pub fn new(
        provider_base_url: &str,
        client_id: impl Into<String>,
        client_secret: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client_id = client_id.into();
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let authorization = if client_secret.is_empty() {
            None
        } else {
            let mut value = HeaderValue::from_str(&basic_authorization(&client_id, client_secret))?;
            value.set_sensitive(true);
            Some(value)
        };

        Ok(Self {
            client,
            token_url: format!("{}{TOKEN_PATH}", provider_base_url.trim_end_matches('/')),
            client_id,
            authorization,
        })
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

#[async_trait]
impl TokenEndpoint for ReqwestTokenEndpoint {
    async fn request_token(&self, grant: &TokenGrant) -> TokenEndpointResponse {
        let body = match serde_urlencoded::to_string(grant.form_fields(&self.client_id)) {
            Ok(body) => body,
            Err(err) => return TokenEndpointResponse::Transport(format!("encode form: {err}")),
        };

        let mut request = self
            .client
            .post(&self.token_url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .body(body);
        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return TokenEndpointResponse::Transport(describe(&err)),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => TokenEndpointResponse::Status { status, body },
            Err(err) => TokenEndpointResponse::Transport(describe(&err)),
        }
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}
