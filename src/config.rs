// src/config.rs
use std::{env, time::Duration};
use thiserror::Error;
use url::Url;

use crate::application::commands::oauth::OAuthClientSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    airtable_url: String,
    listen_addr: String,
    authorization_ttl: Duration,
    sweep_interval: Duration,
    token_request_timeout: Duration,
    rate_limit_enabled: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_airtable_url() -> String {
    "https://airtable.com".into()
}

fn default_port() -> u16 {
    4000
}

fn default_authorization_ttl() -> u64 {
    600
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_token_request_timeout() -> u64 {
    30
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let secs = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a whole number of seconds")))?,
        None => default,
    };
    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{key} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

fn flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(format!("{key} must be true or false"))),
    }
}

fn absolute_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|err| ConfigError::Invalid(format!("{key}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!("{key} must be an http(s) URL")));
    }
    Ok(())
}

impl AppConfig {
    /// Build configuration from environment variables, after loading a
    /// `.env` file when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Client id, redirect URI and scope are required; everything else has a
    /// default. All string values are trimmed. An empty client secret means a
    /// public client.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client_id = required(&lookup, "AIRTABLE_CLIENT_ID")?;
        let client_secret = lookup("AIRTABLE_CLIENT_SECRET")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        let redirect_uri = required(&lookup, "AIRTABLE_REDIRECT_URI")?;
        absolute_url("AIRTABLE_REDIRECT_URI", &redirect_uri)?;
        let scope = required(&lookup, "AIRTABLE_SCOPE")?;

        let airtable_url = lookup("AIRTABLE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_airtable_url);
        absolute_url("AIRTABLE_URL", &airtable_url)?;

        let listen_addr = match lookup("LISTEN_ADDR").map(|addr| addr.trim().to_string()) {
            Some(addr) if !addr.is_empty() => addr,
            _ => {
                let port = match lookup("PORT") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| ConfigError::Invalid("PORT must be a valid port number".into()))?,
                    None => default_port(),
                };
                format!("127.0.0.1:{port}")
            }
        };

        let authorization_ttl =
            seconds(&lookup, "AUTHORIZATION_TTL_SECONDS", default_authorization_ttl())?;
        let sweep_interval =
            seconds(&lookup, "AUTHORIZATION_SWEEP_SECONDS", default_sweep_interval())?;
        let token_request_timeout = seconds(
            &lookup,
            "TOKEN_REQUEST_TIMEOUT_SECONDS",
            default_token_request_timeout(),
        )?;
        let rate_limit_enabled = flag(&lookup, "RATE_LIMIT_ENABLED", true)?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            scope,
            airtable_url,
            listen_addr,
            authorization_ttl,
            sweep_interval,
            token_request_timeout,
            rate_limit_enabled,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn airtable_url(&self) -> &str {
        &self.airtable_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn authorization_ttl(&self) -> Duration {
        self.authorization_ttl
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    pub fn token_request_timeout(&self) -> Duration {
        self.token_request_timeout
    }

    pub fn rate_limit_enabled(&self) -> bool {
        self.rate_limit_enabled
    }

    pub fn oauth_settings(&self) -> Result<OAuthClientSettings, ConfigError> {
        let authorization_ttl = chrono::Duration::from_std(self.authorization_ttl)
            .map_err(|_| ConfigError::Invalid("AUTHORIZATION_TTL_SECONDS is too large".into()))?;

        Ok(OAuthClientSettings {
            client_id: self.client_id.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scope: self.scope.clone(),
            provider_base_url: self.airtable_url.clone(),
            authorization_ttl,
        })
    }
}
