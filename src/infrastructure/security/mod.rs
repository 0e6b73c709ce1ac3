// src/infrastructure/security/mod.rs
pub mod correlation_store;
pub mod entropy;
