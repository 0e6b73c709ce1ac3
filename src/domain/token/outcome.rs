// src/domain/token/outcome.rs
use crate::domain::token::grant::GrantKind;
use serde::Serialize;
use serde_json::Value;

/// Result of the most recent token request.
///
/// Payloads are the provider's raw JSON body: tokens on success, the error
/// object on a known failure. Unknown failures carry nothing so that
/// transport details never reach end users.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum TokenExchangeOutcome {
    #[default]
    None,
    Loading,
    AuthorizationSuccess(Value),
    AuthorizationError(Value),
    UnknownAuthorizationError,
    RefreshSuccess(Value),
    RefreshError(Value),
    UnknownRefreshError,
}

impl TokenExchangeOutcome {
    pub fn success(kind: GrantKind, payload: Value) -> Self {
        match kind {
            GrantKind::Authorization => Self::AuthorizationSuccess(payload),
            GrantKind::Refresh => Self::RefreshSuccess(payload),
        }
    }

    pub fn known_error(kind: GrantKind, payload: Value) -> Self {
        match kind {
            GrantKind::Authorization => Self::AuthorizationError(payload),
            GrantKind::Refresh => Self::RefreshError(payload),
        }
    }

    pub fn unknown_error(kind: GrantKind) -> Self {
        match kind {
            GrantKind::Authorization => Self::UnknownAuthorizationError,
            GrantKind::Refresh => Self::UnknownRefreshError,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Loading => "loading",
            Self::AuthorizationSuccess(_) => "authorization_success",
            Self::AuthorizationError(_) => "authorization_error",
            Self::UnknownAuthorizationError => "unknown_authorization_error",
            Self::RefreshSuccess(_) => "refresh_success",
            Self::RefreshError(_) => "refresh_error",
            Self::UnknownRefreshError => "unknown_refresh_error",
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::AuthorizationSuccess(v)
            | Self::AuthorizationError(v)
            | Self::RefreshSuccess(v)
            | Self::RefreshError(v) => Some(v),
            Self::None
            | Self::Loading
            | Self::UnknownAuthorizationError
            | Self::UnknownRefreshError => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::AuthorizationSuccess(_) | Self::RefreshSuccess(_))
    }

    pub fn is_known_error(&self) -> bool {
        matches!(self, Self::AuthorizationError(_) | Self::RefreshError(_))
    }

    pub fn is_unknown_error(&self) -> bool {
        matches!(self, Self::UnknownAuthorizationError | Self::UnknownRefreshError)
    }
}
