// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Callback `state` is missing, unknown, expired or already used.
    #[error("request not recognized")]
    CorrelationFailure,

    /// The provider redirected back with an `error` parameter.
    #[error("provider denied authorization: {error}")]
    ProviderDenied {
        error: String,
        description: Option<String>,
    },

    #[error("validation error: {0}")]
    Validation(String),

    /// A broken internal invariant, e.g. a repeated state token.
    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::Integrity(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn provider_denied(error: impl Into<String>, description: Option<String>) -> Self {
        Self::ProviderDenied {
            error: error.into(),
            description,
        }
    }
}
