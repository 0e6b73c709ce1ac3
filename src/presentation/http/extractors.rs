// src/presentation/http/extractors.rs
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use headers::{ContentType, HeaderMapExt};
use serde_json::Value;

use super::error::HttpError;

/// The `refresh_token` field of a form-encoded or JSON request body, left
/// unvalidated so the application layer can tell "missing" from "not a
/// string".
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTokenField(pub Option<Value>);

impl<S> FromRequest<S> for RefreshTokenField
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .typed_get::<ContentType>()
            .is_some_and(|ct| ct.to_string().starts_with("application/json"));

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| HttpError::bad_request("failed to read request body"))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        if is_json {
            let value: Value = serde_json::from_slice(&body)
                .map_err(|_| HttpError::bad_request("request body is not valid JSON"))?;
            return Ok(Self(value.get("refresh_token").cloned()));
        }

        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&body)
            .map_err(|_| HttpError::bad_request("request body is not form encoded"))?;
        Ok(Self(
            pairs
                .into_iter()
                .find(|(key, _)| key == "refresh_token")
                .map(|(_, value)| Value::String(value)),
        ))
    }
}
