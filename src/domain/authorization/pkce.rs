// src/domain/authorization/pkce.rs
use crate::domain::authorization::services::EntropySource;
use crate::domain::authorization::value_objects::{CodeChallenge, CodeChallengeMethod, CodeVerifier};

/// Verifier, its S256 challenge and the method literal sent to the provider.
#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: CodeVerifier,
    pub challenge: CodeChallenge,
    pub method: CodeChallengeMethod,
}

impl PkcePair {
    pub fn generate(source: &dyn EntropySource) -> Self {
        let verifier = CodeVerifier::generate(source);
        let challenge = verifier.challenge();
        Self {
            verifier,
            challenge,
            method: CodeChallengeMethod::S256,
        }
    }
}
