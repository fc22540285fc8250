//! PayPay API trait and context
//!
//! Provides the base trait and context for all PayPay API implementations.

use std::sync::Arc;

use http::HeaderMap;
use reqwest::Method;
use serde::Serialize;

use crate::client::{ClientIdentity, DeviceProfile, PayPayClient};
use crate::error::PayPayError;
use crate::session::Session;
use crate::types::{AccessToken, RemoteResult};

/// Context holding shared resources for PayPay API implementations.
///
/// Every request goes through [`PayPayContext::send`], which merges the
/// device profile, the session identifiers and (for authorized calls) the
/// bearer token into one header bundle.
#[derive(Clone)]
pub struct PayPayContext {
    pub(crate) client: Arc<PayPayClient>,
    pub(crate) session: Arc<Session>,
    pub(crate) device: Arc<DeviceProfile>,
}

impl std::fmt::Debug for PayPayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPayContext")
            .field("client", &self.client)
            .field("session", &self.session)
            .field("device", &self.device)
            .finish()
    }
}

impl PayPayContext {
    /// Create a new PayPayContext
    pub fn new(
        client: Arc<PayPayClient>,
        session: Arc<Session>,
        device: Arc<DeviceProfile>,
    ) -> Self {
        Self {
            client,
            session,
            device,
        }
    }

    pub fn client(&self) -> &PayPayClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn device(&self) -> &DeviceProfile {
        &self.device
    }

    /// Return the bearer token, or fail before anything touches the network.
    pub(crate) fn require_token(&self) -> Result<AccessToken, PayPayError> {
        self.session
            .access_token()
            .ok_or(PayPayError::SessionNotEstablished)
    }

    fn headers(&self, access_token: Option<&AccessToken>) -> Result<HeaderMap, PayPayError> {
        let app_version = self.session.app_version();
        self.device.headers(&ClientIdentity {
            client_uuid: self.session.client_uuid(),
            device_uuid: self.session.device_uuid(),
            app_version: &app_version,
            access_token,
        })
    }

    /// Build and send one request; the single place headers are assembled.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        access_token: Option<&AccessToken>,
    ) -> Result<RemoteResult, PayPayError> {
        let headers = self.headers(access_token)?;
        self.client.request(method, path, headers, body).await
    }

    pub(crate) async fn authorized_get(&self, path: &str) -> Result<RemoteResult, PayPayError> {
        let token = self.require_token()?;
        self.send::<()>(Method::GET, path, None, Some(&token)).await
    }

    pub(crate) async fn authorized_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RemoteResult, PayPayError> {
        let token = self.require_token()?;
        self.send(Method::POST, path, Some(body), Some(&token)).await
    }
}

/// Trait for PayPay API implementations.
///
/// All API modules implement this trait to provide
/// access to the shared context.
pub trait PayPayApi: Send + Sync {
    /// Get a reference to the PayPay context
    fn context(&self) -> &PayPayContext;

    /// Get the name of this API for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
