//! HTTP Contract Tests
//!
//! Transport failures reach the caller as `PayPayError::Http`, unwrapped
//! and without retries. Result codes in the JSON header, not HTTP status,
//! decide domain errors.

use paypay_sdk::error::PayPayError;
use paypay_sdk::types::AccessToken;
use paypay_sdk::PayPay;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(base_url: &str) -> PayPay {
    PayPay::builder()
        .base_url(base_url)
        .access_token(AccessToken::new("T1").unwrap())
        .app_version("3.41.1")
        .build()
        .unwrap()
}

/// Malformed JSON is a transport-level failure, sent once
#[tokio::test]
async fn test_malformed_json_returns_http_error_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bff/v1/getBalanceInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let paypay = create_test_client(&mock_server.uri());
    let result = paypay.get_balance().await;

    let err = result.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {:?}", err);
}

/// 5xx with a non-JSON body surfaces as a transport error, sent once
#[tokio::test]
async fn test_server_error_html_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bff/v2/getProfileDisplayInfo"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let paypay = create_test_client(&mock_server.uri());
    let result = paypay.get_profile().await;

    assert!(matches!(result, Err(PayPayError::Http(_))));
}

/// HTTP 4xx with a JSON envelope is classified by its result code
#[tokio::test]
async fn test_4xx_with_envelope_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bff/v1/getBalanceInfo"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "header": {"resultCode": "S0001", "resultMessage": "unauthorized"},
            "error": {}
        })))
        .mount(&mock_server)
        .await;

    let paypay = create_test_client(&mock_server.uri());
    let result = paypay.get_balance().await;

    assert!(matches!(result, Err(PayPayError::TokenRevoked)));
}

/// Connection refusal propagates as a transport error
#[tokio::test]
async fn test_connection_refused() {
    let paypay = PayPay::builder()
        .base_url("http://127.0.0.1:1")
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let result = paypay.login("09012345678", "pw").await;

    assert!(matches!(result, Err(PayPayError::Http(_))));
    assert!(!paypay.is_authenticated());
}

/// A timeout configured on the builder propagates as a transport error
#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bff/v1/getBalanceInfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(serde_json::json!({"header": {"resultCode": "S0000"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let paypay = PayPay::builder()
        .base_url(mock_server.uri())
        .access_token(AccessToken::new("T1").unwrap())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let result = paypay.get_balance().await;

    assert!(matches!(result, Err(PayPayError::Http(_))));
}
