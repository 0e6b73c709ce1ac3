// src/application/dto/oauth.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Where to send the end user to start an authorization.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorizationRedirectDto {
    pub authorization_url: String,
    /// The pending request is forgotten after this instant.
    pub expires_at: DateTime<Utc>,
}
