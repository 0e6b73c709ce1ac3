// src/domain/authorization/services.rs

/// Source of cryptographically secure random bytes.
///
/// Implementations must not fail silently: an exhausted or broken entropy
/// source is unrecoverable and should abort rather than hand back weak bytes.
pub trait EntropySource: Send + Sync {
    fn fill(&self, dest: &mut [u8]);
}
