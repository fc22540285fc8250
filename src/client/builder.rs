use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::api::PayPayContext;
use crate::error::PayPayError;
use crate::session::{Session, FALLBACK_APP_VERSION};
use crate::types::{AccessToken, ClientUuid, DeviceUuid};
use crate::version::DEFAULT_VERSION_LOOKUP_URL;

use super::paypay_client::{
    PayPayClient, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use super::{DeviceProfile, PayPay};

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<ReqwestResponse, reqwest::Error>> + Send>>;
type MiddlewareExecutor = Arc<dyn Fn(ReqwestRequest) -> MiddlewareFuture + Send + Sync>;

/// Builder for [`PayPay`]
///
/// Omitted identifiers are generated as fresh uppercase UUIDs; passing a
/// stored access token resumes a previous session.
#[must_use]
#[derive(Default)]
pub struct PayPayBuilder<M = ()> {
    access_token: Option<AccessToken>,
    client_uuid: Option<ClientUuid>,
    device_uuid: Option<DeviceUuid>,
    base_url: Option<String>,
    version_lookup_url: Option<String>,
    app_version: Option<String>,
    device_profile: Option<DeviceProfile>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for PayPayBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPayBuilder")
            .field("access_token", &self.access_token)
            .field("client_uuid", &self.client_uuid)
            .field("device_uuid", &self.device_uuid)
            .field("base_url", &self.base_url)
            .field("app_version", &self.app_version)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl<M> PayPayBuilder<M> {
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    pub fn client_uuid(mut self, id: ClientUuid) -> Self {
        self.client_uuid = Some(id);
        self
    }

    pub fn device_uuid(mut self, id: DeviceUuid) -> Self {
        self.device_uuid = Some(id);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn version_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.version_lookup_url = Some(url.into());
        self
    }

    /// Pin the `Client-Version` header; [`connect`](Self::connect) then skips the lookup.
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    pub fn device_profile(mut self, profile: DeviceProfile) -> Self {
        self.device_profile = Some(profile);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> PayPayBuilder<M2>
    where
        M2: Layer<PayPayClient> + Clone + Send + Sync + 'static,
    {
        PayPayBuilder {
            access_token: self.access_token,
            client_uuid: self.client_uuid,
            device_uuid: self.device_uuid,
            base_url: self.base_url,
            version_lookup_url: self.version_lookup_url,
            app_version: self.app_version,
            device_profile: self.device_profile,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            middleware: Some(middleware),
        }
    }

    /// Build the client without any network I/O.
    ///
    /// The app version is the pinned one, or the fallback until
    /// [`PayPay::refresh_app_version`] runs.
    pub fn build(self) -> Result<PayPay, PayPayError>
    where
        M: Layer<PayPayClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        Ok(self.build_inner()?.0)
    }

    /// Build the client and resolve the app version before returning.
    ///
    /// A failed lookup is not an error: the fallback version is kept.
    pub async fn connect(self) -> Result<PayPay, PayPayError>
    where
        M: Layer<PayPayClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let (paypay, version_pinned) = self.build_inner()?;
        if !version_pinned {
            paypay.refresh_app_version().await;
        }
        Ok(paypay)
    }

    fn build_inner(self) -> Result<(PayPay, bool), PayPayError>
    where
        M: Layer<PayPayClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(PayPayError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let mut client = PayPayClient::builder()
            .base_url(base_url)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        let version_pinned = self.app_version.is_some();
        let session = Session::new(
            self.client_uuid.unwrap_or_else(ClientUuid::generate),
            self.device_uuid.unwrap_or_else(DeviceUuid::generate),
            self.access_token,
            self.app_version
                .unwrap_or_else(|| FALLBACK_APP_VERSION.to_string()),
        );
        let context = Arc::new(PayPayContext::new(
            Arc::new(client),
            Arc::new(session),
            Arc::new(self.device_profile.unwrap_or_default()),
        ));
        let version_lookup_url = self
            .version_lookup_url
            .unwrap_or_else(|| DEFAULT_VERSION_LOOKUP_URL.to_string());

        Ok((PayPay::new(context, version_lookup_url), version_pinned))
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}
