// src/application/dto/mod.rs
pub mod oauth;

pub use oauth::AuthorizationRedirectDto;
