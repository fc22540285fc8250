//! PayPay HTTP Client
//!
//! Provides the HTTP transport shared by every PayPay API call.

use http::HeaderMap;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

use crate::error::PayPayError;
use crate::types::{classify, RemoteResult};

pub(crate) const DEFAULT_BASE_URL: &str = "https://app4.paypay.ne.jp";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
type MiddlewareExecutor = Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// PayPay API Client
///
/// Reusable HTTP client for calling PayPay APIs.
/// Built with reqwest for async HTTP requests.
#[derive(Clone)]
pub struct PayPayClient {
    http: Client,
    base_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for PayPayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPayClient")
            .field("base_url", &self.base_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl PayPayClient {
    /// Create a new client builder
    pub fn builder() -> PayPayClientBuilder {
        PayPayClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    async fn execute(&self, request: reqwest::Request) -> Result<RemoteResult, PayPayError> {
        log::debug!("[PayPay] {} {}", request.method(), request.url().path());

        let response = self.send_request(request).await?;
        let status = response.status();
        let body: serde_json::Value = response.json().await?;
        let result = classify(body);

        log::debug!(
            "[PayPay] status={} resultCode={}",
            status.as_u16(),
            result.header().result_code
        );

        Ok(result)
    }

    /// Send a request to the PayPay API and classify the response.
    ///
    /// `path` includes any fixed query string. HTTP status codes are not
    /// treated as failures: the backend reports errors in the JSON header.
    ///
    /// # Errors
    /// - Returns `PayPayError::Http` when the transport fails or the body is not JSON
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<&B>,
    ) -> Result<RemoteResult, PayPayError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder.build()?;
        self.execute(request).await
    }

    /// GET an absolute URL outside the PayPay host and decode the JSON body.
    pub(crate) async fn get_external<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, PayPayError> {
        let request = self.http.get(url).build()?;
        let response = self.send_request(request).await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl Service<reqwest::Request> for PayPayClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for PayPayClient
///
/// # Example
///
/// ```rust
/// use paypay_sdk::client::PayPayClient;
///
/// let client = PayPayClient::builder()
///     .base_url("https://app4.paypay.ne.jp")
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url(), "https://app4.paypay.ne.jp");
/// ```
#[derive(Debug, Default)]
pub struct PayPayClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl PayPayClientBuilder {
    /// Set the base URL for API calls
    ///
    /// Default: `<https://app4.paypay.ne.jp>`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the PayPayClient
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed
    pub fn build(self) -> Result<PayPayClient, PayPayError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(PayPayClient {
            http: client,
            base_url,
            middleware_executor: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_builder_default_values() {
        let client = PayPayClient::builder().build().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_custom_base_url_trims_slash() {
        let client = PayPayClient::builder()
            .base_url("https://custom.api.example.com/")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://custom.api.example.com");
    }

    #[tokio::test]
    async fn test_request_sends_headers_and_classifies() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bff/v2/getProfileDisplayInfo"))
            .and(header("client-type", "PAYPAYAPP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "header": {"resultCode": "S0000", "resultMessage": ""},
                "payload": {"ok": true}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PayPayClient::builder()
            .base_url(mock_server.uri())
            .build()
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("client-type", "PAYPAYAPP".parse().unwrap());

        let result = client
            .request::<()>(Method::GET, "/bff/v2/getProfileDisplayInfo", headers, None)
            .await
            .unwrap();

        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_non_2xx_json_body_is_still_classified() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bff/v1/getBalanceInfo"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "header": {"resultCode": "S0001", "resultMessage": "unauthorized"},
                "error": {}
            })))
            .mount(&mock_server)
            .await;

        let client = PayPayClient::builder()
            .base_url(mock_server.uri())
            .build()
            .unwrap();

        let result = client
            .request::<()>(Method::GET, "/bff/v1/getBalanceInfo", HeaderMap::new(), None)
            .await
            .unwrap();

        assert!(matches!(result, RemoteResult::Error { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bff/v1/getBalanceInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = PayPayClient::builder()
            .base_url(mock_server.uri())
            .build()
            .unwrap();

        let result = client
            .request::<()>(Method::GET, "/bff/v1/getBalanceInfo", HeaderMap::new(), None)
            .await;

        assert!(matches!(result, Err(PayPayError::Http(_))));
    }
}
