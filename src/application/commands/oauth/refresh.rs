use serde_json::Value;

use super::OAuthCommandService;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::token::{TokenExchangeOutcome, TokenGrant};

pub const NO_REFRESH_TOKEN: &str = "no refresh token supplied";
pub const REFRESH_TOKEN_NOT_STRING: &str = "refresh token was not a string";

pub struct RefreshTokenCommand {
    /// Raw `refresh_token` field of the request body, if any.
    pub refresh_token: Option<Value>,
}

impl RefreshTokenCommand {
    fn into_token(self) -> ApplicationResult<String> {
        match self.refresh_token {
            None | Some(Value::Null) => Err(ApplicationError::validation(NO_REFRESH_TOKEN)),
            Some(Value::String(token)) if token.trim().is_empty() => {
                Err(ApplicationError::validation(NO_REFRESH_TOKEN))
            }
            Some(Value::String(token)) => Ok(token),
            Some(_) => Err(ApplicationError::validation(REFRESH_TOKEN_NOT_STRING)),
        }
    }
}

impl OAuthCommandService {
    pub async fn refresh(
        &self,
        command: RefreshTokenCommand,
    ) -> ApplicationResult<TokenExchangeOutcome> {
        let refresh_token = command.into_token()?;
        let grant = TokenGrant::RefreshToken { refresh_token };
        Ok(self.exchanger.exchange(grant).await)
    }
}
