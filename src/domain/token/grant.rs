// src/domain/token/grant.rs
use crate::domain::authorization::CodeVerifier;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantKind {
    Authorization,
    Refresh,
}

impl GrantKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authorization => "authorization_code",
            Self::Refresh => "refresh_token",
        }
    }
}

/// Parameters for one call to the provider's token endpoint.
#[derive(Clone)]
pub enum TokenGrant {
    AuthorizationCode {
        code: String,
        code_verifier: CodeVerifier,
        redirect_uri: String,
    },
    RefreshToken {
        refresh_token: String,
    },
}

impl TokenGrant {
    pub fn kind(&self) -> GrantKind {
        match self {
            Self::AuthorizationCode { .. } => GrantKind::Authorization,
            Self::RefreshToken { .. } => GrantKind::Refresh,
        }
    }

    /// Form body for the token request. `client_id` is always present, even
    /// when the client also authenticates with a Basic header.
    pub fn form_fields<'a>(&'a self, client_id: &'a str) -> Vec<(&'static str, &'a str)> {
        match self {
            Self::AuthorizationCode {
                code,
                code_verifier,
                redirect_uri,
            } => vec![
                ("client_id", client_id),
                ("code_verifier", code_verifier.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("code", code.as_str()),
                ("grant_type", GrantKind::Authorization.as_str()),
            ],
            Self::RefreshToken { refresh_token } => vec![
                ("client_id", client_id),
                ("grant_type", GrantKind::Refresh.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ],
        }
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthorizationCode { redirect_uri, .. } => f
                .debug_struct("AuthorizationCode")
                .field("redirect_uri", redirect_uri)
                .finish_non_exhaustive(),
            Self::RefreshToken { .. } => f.debug_struct("RefreshToken").finish_non_exhaustive(),
        }
    }
}
