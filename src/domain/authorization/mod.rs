pub mod entity;
pub mod pkce;
pub mod services;
pub mod value_objects;

pub use entity::PendingAuthorization;
pub use pkce::PkcePair;
pub use services::EntropySource;
pub use value_objects::{CodeChallenge, CodeChallengeMethod, CodeVerifier, StateToken};
