// src/domain/authorization/value_objects.rs
use crate::domain::authorization::services::EntropySource;
use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Random bytes behind a state token; encodes to 134 base64url characters.
pub const STATE_ENTROPY_BYTES: usize = 100;
/// Random bytes behind a code verifier; encodes to exactly 128 characters.
pub const VERIFIER_ENTROPY_BYTES: usize = 96;

pub const MIN_VERIFIER_LEN: usize = 43;
pub const MAX_VERIFIER_LEN: usize = 128;

fn encode_entropy(source: &dyn EntropySource, len: usize) -> String {
    let mut bytes = vec![0u8; len];
    source.fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(&bytes)
}

/// Opaque correlation token sent as `state` and echoed back by the provider.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateToken(String);

impl StateToken {
    pub fn generate(source: &dyn EntropySource) -> Self {
        Self(encode_entropy(source, STATE_ENTROPY_BYTES))
    }

    /// Wrap a state value received from a callback.
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("state must not be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// State tokens are bearer secrets until consumed; keep them out of logs.
impl fmt::Debug for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "StateToken({prefix}…)")
    }
}

/// PKCE code verifier (RFC 7636 section 4.1).
#[derive(Clone, PartialEq, Eq)]
pub struct CodeVerifier(String);

impl CodeVerifier {
    pub fn generate(source: &dyn EntropySource) -> Self {
        Self(encode_entropy(source, VERIFIER_ENTROPY_BYTES))
    }

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !(MIN_VERIFIER_LEN..=MAX_VERIFIER_LEN).contains(&value.len()) {
            return Err(DomainError::Validation(format!(
                "code verifier must be between {MIN_VERIFIER_LEN} and {MAX_VERIFIER_LEN} characters"
            )));
        }
        let unreserved = value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~'));
        if !unreserved {
            return Err(DomainError::Validation(
                "code verifier contains characters outside the unreserved set".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn challenge(&self) -> CodeChallenge {
        CodeChallenge::derive(self)
    }
}

impl fmt::Debug for CodeVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CodeVerifier(<redacted>)")
    }
}

/// `base64url(sha256(verifier))` without padding. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChallenge(String);

impl CodeChallenge {
    /// Hashes the ASCII bytes of the encoded verifier string, not the raw entropy.
    pub fn derive(verifier: &CodeVerifier) -> Self {
        let digest = Sha256::digest(verifier.as_str().as_bytes());
        Self(URL_SAFE_NO_PAD.encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeChallengeMethod {
    S256,
}

impl CodeChallengeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S256 => "S256",
        }
    }
}

impl fmt::Display for CodeChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
