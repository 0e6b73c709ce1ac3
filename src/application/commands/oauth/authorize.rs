use std::collections::BTreeMap;

use url::Url;

use super::OAuthCommandService;
use crate::application::{
    dto::AuthorizationRedirectDto,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::authorization::{PendingAuthorization, PkcePair, StateToken};

pub const AUTHORIZE_PATH: &str = "/oauth2/v1/authorize";

#[derive(Debug, Default, Clone)]
pub struct BeginAuthorizationCommand {
    /// Carried alongside the verifier and handed back on callback.
    pub metadata: BTreeMap<String, String>,
}

impl OAuthCommandService {
    pub async fn begin_authorization(
        &self,
        command: BeginAuthorizationCommand,
    ) -> ApplicationResult<AuthorizationRedirectDto> {
        let state = StateToken::generate(self.entropy.as_ref());
        let pkce = PkcePair::generate(self.entropy.as_ref());

        let url = self.authorization_url(&state, &pkce)?;

        let pending = PendingAuthorization::new(
            state,
            pkce.verifier,
            command.metadata,
            self.clock.now(),
            self.settings.authorization_ttl,
        );
        let expires_at = pending.expires_at;
        self.correlation_store.put(pending).await?;

        tracing::info!(%expires_at, "authorization request issued");

        Ok(AuthorizationRedirectDto {
            authorization_url: url.into(),
            expires_at,
        })
    }

    fn authorization_url(&self, state: &StateToken, pkce: &PkcePair) -> ApplicationResult<Url> {
        let base = format!(
            "{}{AUTHORIZE_PATH}",
            self.settings.provider_base_url.trim_end_matches('/')
        );
        let mut url = Url::parse(&base)
            .map_err(|err| ApplicationError::infrastructure(format!("invalid provider url: {err}")))?;

        url.query_pairs_mut()
            .append_pair("code_challenge", pkce.challenge.as_str())
            .append_pair("code_challenge_method", pkce.method.as_str())
            .append_pair("state", state.as_str())
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.settings.scope);

        Ok(url)
    }
}
