// src/domain/mod.rs
pub mod authorization;
pub mod errors;
pub mod token;
