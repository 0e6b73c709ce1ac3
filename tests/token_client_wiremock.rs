use airtable_oauth_client::application::ports::token_endpoint::{
    TokenEndpoint, TokenEndpointResponse,
};
use airtable_oauth_client::domain::authorization::CodeVerifier;
use airtable_oauth_client::domain::token::TokenGrant;
use airtable_oauth_client::infrastructure::provider::token_client::ReqwestTokenEndpoint;
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer, secret: &str, timeout: Duration) -> ReqwestTokenEndpoint {
    ReqwestTokenEndpoint::new(&server.uri(), "client-123", secret, timeout).unwrap()
}

fn authorization_grant() -> TokenGrant {
    TokenGrant::AuthorizationCode {
        code: "ABC".into(),
        code_verifier: CodeVerifier::new("v".repeat(64)).unwrap(),
        redirect_uri: "http://localhost:4000/airtable-oauth".into(),
    }
}

async fn only_request(server: &MockServer) -> wiremock::Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

fn form(request: &wiremock::Request) -> HashMap<String, String> {
    serde_urlencoded::from_bytes(&request.body).unwrap()
}

#[tokio::test]
async fn authorization_code_grant_is_posted_as_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"access_token":"t1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let response = endpoint(&server, "s3cret", Duration::from_secs(5))
        .request_token(&authorization_grant())
        .await;

    assert_eq!(
        response,
        TokenEndpointResponse::Status {
            status: 200,
            body: r#"{"access_token":"t1"}"#.into()
        }
    );

    let request = only_request(&server).await;
    let fields = form(&request);
    assert_eq!(fields["client_id"], "client-123");
    assert_eq!(fields["code"], "ABC");
    assert_eq!(fields["grant_type"], "authorization_code");
    assert_eq!(fields["code_verifier"], "v".repeat(64));
    assert_eq!(fields["redirect_uri"], "http://localhost:4000/airtable-oauth");
    assert!(!fields.contains_key("code_challenge"));
    assert_eq!(
        request.headers.get("authorization").unwrap(),
        "Basic Y2xpZW50LTEyMzpzM2NyZXQ="
    );
}

#[tokio::test]
async fn public_client_omits_basic_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let grant = TokenGrant::RefreshToken {
        refresh_token: "r1".into(),
    };
    endpoint(&server, "", Duration::from_secs(5))
        .request_token(&grant)
        .await;

    let request = only_request(&server).await;
    assert!(request.headers.get("authorization").is_none());
    let fields = form(&request);
    assert_eq!(fields["grant_type"], "refresh_token");
    assert_eq!(fields["refresh_token"], "r1");
    assert_eq!(fields["client_id"], "client-123");
}

#[tokio::test]
async fn error_status_and_body_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#),
        )
        .mount(&server)
        .await;

    let response = endpoint(&server, "s3cret", Duration::from_secs(5))
        .request_token(&authorization_grant())
        .await;

    assert_eq!(
        response,
        TokenEndpointResponse::Status {
            status: 401,
            body: r#"{"error":"invalid_client"}"#.into()
        }
    );
}

#[tokio::test]
async fn slow_provider_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let response = endpoint(&server, "", Duration::from_millis(100))
        .request_token(&authorization_grant())
        .await;

    let TokenEndpointResponse::Transport(reason) = response else {
        panic!("expected a transport failure, got {response:?}");
    };
    assert!(reason.starts_with("timed out"), "{reason}");
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_failure() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let response =
        ReqwestTokenEndpoint::new(&format!("http://{addr}"), "client-123", "", Duration::from_secs(2))
            .unwrap()
            .request_token(&authorization_grant())
            .await;

    assert!(matches!(response, TokenEndpointResponse::Transport(_)));
}
