//! Token exchange tests against a mocked Stripe token endpoint.

use hostconnect_stripe::error::StripeError;
use hostconnect_stripe::{HttpTokenExchanger, StripeConnectOptions, TokenExchanger};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options_for(server: &MockServer) -> StripeConnectOptions {
    let mut options = StripeConnectOptions::new("ca_test_client", "sk_test_platform");
    options.token_url = format!("{}/oauth/token", server.uri());
    options.timeout_secs = 5;
    options
}

fn stripe_reply() -> serde_json::Value {
    json!({
        "access_token": "sk_test_123",
        "refresh_token": "rt_123",
        "token_type": "bearer",
        "stripe_publishable_key": "pk_test_123",
        "stripe_user_id": "acct_123",
        "scope": "read_write"
    })
}

#[tokio::test]
async fn exchange_posts_code_with_platform_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "grant_type": "authorization_code",
            "client_id": "ca_test_client",
            "client_secret": "sk_test_platform",
            "code": "abc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(stripe_reply()))
        .expect(1)
        .mount(&server)
        .await;

    let exchanger = HttpTokenExchanger::new(options_for(&server)).unwrap();
    let tokens = exchanger.exchange_code("abc").await.unwrap();

    assert_eq!(tokens.access_token, "sk_test_123");
    assert_eq!(tokens.refresh_token, "rt_123");
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(tokens.stripe_publishable_key, "pk_test_123");
    assert_eq!(tokens.stripe_user_id, "acct_123");
    assert_eq!(tokens.scope, "read_write");
}

#[tokio::test]
async fn stripe_error_reply_is_rejected_with_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Authorization code does not exist: nope"
        })))
        .mount(&server)
        .await;

    let exchanger = HttpTokenExchanger::new(options_for(&server)).unwrap();
    let err = exchanger.exchange_code("nope").await.unwrap_err();

    assert_eq!(
        err,
        StripeError::Rejected {
            status: 400,
            message: "Authorization code does not exist: nope".into(),
        }
    );
}

#[tokio::test]
async fn non_json_error_reply_keeps_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let exchanger = HttpTokenExchanger::new(options_for(&server)).unwrap();
    let err = exchanger.exchange_code("abc").await.unwrap_err();

    assert!(matches!(
        err,
        StripeError::Rejected { status: 503, ref message } if message == "upstream unavailable"
    ));
}

#[tokio::test]
async fn incomplete_success_reply_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "sk_test_123",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let exchanger = HttpTokenExchanger::new(options_for(&server)).unwrap();
    let err = exchanger.exchange_code("abc").await.unwrap_err();

    assert!(matches!(err, StripeError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let mut options = StripeConnectOptions::new("ca_test_client", "sk_test_platform");
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    options.token_url = "http://127.0.0.1:9/oauth/token".into();
    options.timeout_secs = 2;

    let exchanger = HttpTokenExchanger::new(options).unwrap();
    let err = exchanger.exchange_code("abc").await.unwrap_err();

    assert!(matches!(err, StripeError::Transport(_)));
}
