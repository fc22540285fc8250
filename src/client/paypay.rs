//! Unified PayPay session client

use std::sync::Arc;

use crate::api::auth::{AuthApi, LoginResult, LoginTokens};
use crate::api::link::{CreatedLink, LinkApi, LinkInfo};
use crate::api::profile::{Profile, ProfileApi};
use crate::api::transfer::TransferApi;
use crate::api::wallet::{Balance, BalanceInfo, History, WalletApi, DEFAULT_HISTORY_PAGE_SIZE};
use crate::api::PayPayContext;
use crate::error::PayPayError;
use crate::session::SessionState;
use crate::types::{AccessToken, ClientUuid, DeviceUuid};
use crate::version::lookup_app_version;

/// Unified PayPay client
///
/// One instance is one session: it owns the simulated installation
/// identifiers and, once logged in, the bearer token. Clones share the
/// same session.
///
/// # Example
///
/// ```rust,ignore
/// use paypay_sdk::{LoginResult, PayPay};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let paypay = PayPay::builder().connect().await?;
///
///     if let LoginResult::OtpRequired(challenge) = paypay.login("09012345678", "password").await? {
///         paypay.complete_otp(&challenge.otp_reference_id, "123456").await?;
///     }
///
///     let balance = paypay.get_balance().await?;
///     println!("Balance: {} JPY", balance.balance);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PayPay {
    context: Arc<PayPayContext>,
    version_lookup_url: Arc<str>,
}

impl std::fmt::Debug for PayPay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPay")
            .field("context", &self.context)
            .field("version_lookup_url", &self.version_lookup_url)
            .finish()
    }
}

impl PayPay {
    pub fn builder() -> super::builder::PayPayBuilder {
        super::builder::PayPayBuilder::default()
    }

    pub(crate) fn new(context: Arc<PayPayContext>, version_lookup_url: impl Into<Arc<str>>) -> Self {
        Self {
            context,
            version_lookup_url: version_lookup_url.into(),
        }
    }

    pub fn context(&self) -> &Arc<PayPayContext> {
        &self.context
    }

    pub fn client_uuid(&self) -> &ClientUuid {
        self.context.session.client_uuid()
    }

    pub fn device_uuid(&self) -> &DeviceUuid {
        self.context.session.device_uuid()
    }

    /// Current bearer token, for callers that persist sessions themselves
    pub fn access_token(&self) -> Option<AccessToken> {
        self.context.session.access_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.context.session.is_authenticated()
    }

    pub fn state(&self) -> SessionState {
        self.context.session.state()
    }

    pub fn app_version(&self) -> String {
        self.context.session.app_version()
    }

    /// Look up the latest app version and cache it for this session.
    ///
    /// On failure the cached version is kept and a warning is logged; the
    /// returned string is the version now in use.
    pub async fn refresh_app_version(&self) -> String {
        match lookup_app_version(&self.context.client, &self.version_lookup_url).await {
            Ok(version) => {
                log::debug!("[PayPay] using app version {}", version);
                self.context.session.set_app_version(version.as_str());
                version
            }
            Err(e) => {
                let current = self.context.session.app_version();
                log::warn!(
                    "[PayPay] app version lookup failed, keeping {}: {}",
                    current,
                    e
                );
                current
            }
        }
    }

    // Auth API

    pub async fn login(&self, phone_number: &str, password: &str) -> Result<LoginResult, PayPayError> {
        AuthApi::new(self.context.clone())
            .login(phone_number, password)
            .await
    }

    pub async fn complete_otp(
        &self,
        otp_reference_id: &str,
        otp: &str,
    ) -> Result<LoginTokens, PayPayError> {
        AuthApi::new(self.context.clone())
            .complete_otp(otp_reference_id, otp)
            .await
    }

    // Wallet API

    pub async fn get_balance(&self) -> Result<Balance, PayPayError> {
        WalletApi::new(self.context.clone()).get_balance().await
    }

    pub async fn get_balance_info(&self) -> Result<BalanceInfo, PayPayError> {
        WalletApi::new(self.context.clone()).get_balance_info().await
    }

    pub async fn get_history(&self) -> Result<History, PayPayError> {
        self.get_history_page(DEFAULT_HISTORY_PAGE_SIZE).await
    }

    pub async fn get_history_page(&self, page_size: u32) -> Result<History, PayPayError> {
        WalletApi::new(self.context.clone())
            .get_history(page_size)
            .await
    }

    // Link API

    pub async fn create_link(&self, amount: u64) -> Result<CreatedLink, PayPayError> {
        LinkApi::new(self.context.clone()).create_link(amount).await
    }

    pub async fn inspect_link(&self, code: &str) -> Result<LinkInfo, PayPayError> {
        LinkApi::new(self.context.clone()).inspect_link(code).await
    }

    pub async fn accept_link(
        &self,
        code: &str,
        passcode: Option<&str>,
    ) -> Result<serde_json::Value, PayPayError> {
        LinkApi::new(self.context.clone())
            .accept_link(code, passcode)
            .await
    }

    // Transfer API

    pub async fn send_money(
        &self,
        amount: u64,
        external_receiver_id: &str,
    ) -> Result<serde_json::Value, PayPayError> {
        TransferApi::new(self.context.clone())
            .send_money(amount, external_receiver_id)
            .await
    }

    // Profile API

    pub async fn get_profile(&self) -> Result<Profile, PayPayError> {
        ProfileApi::new(self.context.clone()).get_profile().await
    }
}
