// src/presentation/http/controllers/oauth.rs
use crate::application::commands::oauth::{
    BeginAuthorizationCommand, CallbackCommand, RefreshTokenCommand,
};
use crate::domain::token::TokenExchangeOutcome;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::RefreshTokenField;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Query,
    http::{StatusCode, header::LOCATION},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// JSON rendering of a [`TokenExchangeOutcome`].
#[derive(Debug, Serialize, ToSchema)]
pub struct OutcomeResponse {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&TokenExchangeOutcome> for OutcomeResponse {
    fn from(outcome: &TokenExchangeOutcome) -> Self {
        let message = outcome
            .is_unknown_error()
            .then(|| "something went wrong talking to the provider; check the server logs".into());
        Self {
            kind: outcome.kind_str().into(),
            payload: outcome.payload().cloned(),
            message,
        }
    }
}

/// A 400 is either a local rejection or the provider's own error body.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BadRequestBody {
    Rejected(ErrorResponse),
    ProviderError(OutcomeResponse),
}

fn outcome_status(outcome: &TokenExchangeOutcome) -> StatusCode {
    if outcome.is_known_error() {
        StatusCode::BAD_REQUEST
    } else if outcome.is_unknown_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}

fn outcome_response(outcome: &TokenExchangeOutcome) -> (StatusCode, Json<OutcomeResponse>) {
    (outcome_status(outcome), Json(OutcomeResponse::from(outcome)))
}

pub async fn index() -> Html<&'static str> {
    Html(r#"<a href="/redirect-testing">Authorize with Airtable</a>"#)
}

#[utoipa::path(
    get,
    path = "/redirect-testing",
    responses(
        (status = 302, description = "Redirect to the provider's authorization page."),
        (status = 500, description = "Internal error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "OAuth"
)]
pub async fn start_authorization(Extension(state): Extension<HttpState>) -> HttpResult<Response> {
    let redirect = state
        .services
        .oauth_commands
        .begin_authorization(BeginAuthorizationCommand::default())
        .await
        .into_http()?;

    Ok((StatusCode::FOUND, [(LOCATION, redirect.authorization_url)]).into_response())
}

#[utoipa::path(
    get,
    path = "/airtable-oauth",
    params(CallbackParams),
    responses(
        (status = 200, description = "Code exchanged for tokens.", body = OutcomeResponse),
        (status = 400, description = "Unrecognized state or missing code (`ErrorResponse`), or the token endpoint rejected the code (`OutcomeResponse`).", body = BadRequestBody),
        (status = 403, description = "The provider reported an authorization error.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Unexpected failure talking to the token endpoint.", body = OutcomeResponse)
    ),
    tag = "OAuth"
)]
pub async fn callback(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CallbackParams>,
) -> HttpResult<(StatusCode, Json<OutcomeResponse>)> {
    let command = CallbackCommand {
        state: params.state,
        code: params.code,
        error: params.error,
        error_description: params.error_description,
    };

    let outcome = state
        .services
        .oauth_commands
        .handle_callback(command)
        .await
        .into_http()?;

    Ok(outcome_response(&outcome))
}

#[utoipa::path(
    post,
    path = "/refresh_token",
    request_body(
        content = RefreshTokenRequest,
        content_type = "application/x-www-form-urlencoded",
        description = "Form or JSON body carrying `refresh_token`."
    ),
    responses(
        (status = 200, description = "New tokens issued.", body = OutcomeResponse),
        (status = 400, description = "Missing or malformed refresh token (`ErrorResponse`), or the provider rejected it (`OutcomeResponse`).", body = BadRequestBody),
        (status = 502, description = "Unexpected failure talking to the token endpoint.", body = OutcomeResponse)
    ),
    tag = "OAuth"
)]
pub async fn refresh_token(
    Extension(state): Extension<HttpState>,
    RefreshTokenField(refresh_token): RefreshTokenField,
) -> HttpResult<(StatusCode, Json<OutcomeResponse>)> {
    let outcome = state
        .services
        .oauth_commands
        .refresh(RefreshTokenCommand { refresh_token })
        .await
        .into_http()?;

    Ok(outcome_response(&outcome))
}

#[utoipa::path(
    get,
    path = "/token-state",
    responses(
        (status = 200, description = "Outcome of the most recent token request.", body = OutcomeResponse)
    ),
    tag = "OAuth"
)]
pub async fn token_state(Extension(state): Extension<HttpState>) -> Json<OutcomeResponse> {
    let latest = state.services.token_state_queries.latest();
    Json(OutcomeResponse::from(&latest))
}
