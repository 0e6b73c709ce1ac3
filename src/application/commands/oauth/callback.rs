use super::OAuthCommandService;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::authorization::StateToken;
use crate::domain::token::{TokenExchangeOutcome, TokenGrant};

/// Query parameters of the provider's redirect back to us.
#[derive(Debug, Default, Clone)]
pub struct CallbackCommand {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl OAuthCommandService {
    /// Validate a callback against its pending authorization and redeem the
    /// code.
    ///
    /// The state is consumed before anything else is inspected, so a second
    /// delivery of the same callback always fails correlation. A callback
    /// carrying `error` is rejected even when it also carries `code`.
    ///
    /// A `client_id`/`redirect_uri` mismatch never reaches this point: the
    /// provider refuses to redirect at all in that case.
    pub async fn handle_callback(
        &self,
        command: CallbackCommand,
    ) -> ApplicationResult<TokenExchangeOutcome> {
        let Some(state) = command.state.and_then(|raw| StateToken::parse(raw).ok()) else {
            tracing::warn!("callback without state rejected");
            return Err(ApplicationError::CorrelationFailure);
        };

        let Some(pending) = self.correlation_store.take_if_present(&state).await? else {
            tracing::warn!(?state, "callback state not recognized");
            return Err(ApplicationError::CorrelationFailure);
        };

        tracing::debug!(metadata = ?pending.metadata, "callback correlated");

        if let Some(error) = command.error.filter(|error| !error.is_empty()) {
            tracing::info!(%error, "provider denied authorization");
            return Err(ApplicationError::provider_denied(
                error,
                command.error_description,
            ));
        }

        let code = command
            .code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| ApplicationError::validation("authorization code missing from callback"))?;

        let grant = TokenGrant::AuthorizationCode {
            code,
            code_verifier: pending.code_verifier,
            redirect_uri: self.settings.redirect_uri.clone(),
        };

        Ok(self.exchanger.exchange(grant).await)
    }
}
