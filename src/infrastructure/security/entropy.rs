// src/infrastructure/security/entropy.rs
use crate::domain::authorization::EntropySource;
use rand::RngCore;
use rand::rngs::OsRng;

/// Reads straight from the operating system's CSPRNG. `OsRng` panics if the
/// OS source fails, which is the behaviour we want for key material.
#[derive(Default, Clone)]
pub struct OsEntropySource;

impl EntropySource for OsEntropySource {
    fn fill(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}
