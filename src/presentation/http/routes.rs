// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::oauth,
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the router, optionally without per-IP rate limiting on the OAuth
/// routes. The limiter keys on the peer address, so requests that carry no
/// connection info (e.g. `oneshot` in tests) need it switched off.
pub fn build_router_with_rate_limiter(state: HttpState, enable_rate_limiter: bool) -> Router {
    let mut oauth_routes = Router::new()
        .route("/redirect-testing", get(oauth::start_authorization))
        .route("/airtable-oauth", get(oauth::callback))
        .route("/refresh_token", post(oauth::refresh_token));

    if enable_rate_limiter {
        oauth_routes = oauth_routes.layer(rate_limit_layer());
    }

    Router::new()
        .merge(openapi::docs_router())
        .route("/", get(oauth::index))
        .route("/health", get(health))
        .route("/token-state", get(oauth::token_state))
        .merge(oauth_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
