// src/application/ports/mod.rs
pub mod correlation;
pub mod request_state;
pub mod time;
pub mod token_endpoint;

pub use crate::domain::authorization::services::EntropySource;

