// tests/support/helpers.rs
use super::mocks::{CountingEntropy, DummyClock, ScriptedTokenEndpoint};
use airtable_oauth_client::application::commands::oauth::OAuthClientSettings;
use airtable_oauth_client::application::ports::{EntropySource, time::Clock};
use airtable_oauth_client::application::services::ApplicationServices;
use airtable_oauth_client::infrastructure::{
    security::correlation_store::InMemoryCorrelationStore,
    state::request_state::InMemoryRequestStateTracker,
};
use airtable_oauth_client::presentation::http::{
    routes::build_router_with_rate_limiter, state::HttpState,
};
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header::LOCATION};
use axum::response::Response;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt as _;
use url::Url;

pub const CLIENT_ID: &str = "test-client";
pub const REDIRECT_URI: &str = "http://localhost:4000/airtable-oauth";
pub const SCOPE: &str = "data.records:read schema.bases:read";
pub const PROVIDER: &str = "https://airtable.test";

pub fn test_settings() -> OAuthClientSettings {
    OAuthClientSettings {
        client_id: CLIENT_ID.into(),
        redirect_uri: REDIRECT_URI.into(),
        scope: SCOPE.into(),
        provider_base_url: PROVIDER.into(),
        authorization_ttl: chrono::Duration::minutes(10),
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub endpoint: Arc<ScriptedTokenEndpoint>,
    pub services: Arc<ApplicationServices>,
}

pub fn make_test_app() -> TestApp {
    make_test_app_with_entropy(Arc::new(CountingEntropy::default()))
}

pub fn make_test_app_with_entropy(entropy: Arc<dyn EntropySource>) -> TestApp {
    let clock: Arc<dyn Clock> = Arc::new(DummyClock);
    let endpoint = Arc::new(ScriptedTokenEndpoint::default());

    let services = Arc::new(ApplicationServices::new(
        test_settings(),
        Arc::new(InMemoryCorrelationStore::new(Arc::clone(&clock))),
        endpoint.clone(),
        Arc::new(InMemoryRequestStateTracker::new()),
        entropy,
        clock,
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    TestApp {
        router: build_router_with_rate_limiter(state, false),
        endpoint,
        services,
    }
}

pub async fn send(router: &axum::Router, req: Request<Body>) -> Response {
    router.clone().oneshot(req).await.unwrap()
}

pub async fn get(router: &axum::Router, uri: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, req).await
}

pub async fn post_form(router: &axum::Router, uri: &str, body: &str) -> Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, req).await
}

pub async fn post_json(router: &axum::Router, uri: &str, body: &Value) -> Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, req).await
}

pub async fn read_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

/// Hit the start route and return the provider URL's query parameters.
pub async fn begin_flow(router: &axum::Router) -> HashMap<String, String> {
    let resp = get(router, "/redirect-testing").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string();
    let url = Url::parse(&location).expect("absolute location");
    assert_eq!(url.path(), "/oauth2/v1/authorize");
    url.query_pairs().into_owned().collect()
}

pub fn callback_uri(params: &[(&str, &str)]) -> String {
    let query = serde_urlencoded::to_string(params).unwrap();
    format!("/airtable-oauth?{query}")
}
