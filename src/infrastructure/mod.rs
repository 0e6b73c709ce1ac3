// src/infrastructure/mod.rs
pub mod provider;
pub mod security;
pub mod state;
pub mod time;
