//! PayPay direct transfer API

use std::sync::Arc;

use serde::Serialize;

use crate::api::common::{authorized_value, MINIMUM_CLIENT_VERSION, SEND_MONEY_THEME};
use crate::api::r#trait::{PayPayApi, PayPayContext};
use crate::error::PayPayError;
use crate::utils::{new_request_id, tokyo_timestamp};

const SEND_MONEY_PATH: &str = "/bff/v2/executeP2PSendMoney";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMoneyRequest<'a> {
    amount: u64,
    external_receiver_id: &'a str,
    request_at: String,
    request_id: String,
    ios_minimum_version: &'a str,
    android_minimum_version: &'a str,
    theme: &'a str,
}

/// PayPay transfer API
pub struct TransferApi {
    context: Arc<PayPayContext>,
}

impl TransferApi {
    /// Create a new TransferApi instance
    pub fn new(context: Arc<PayPayContext>) -> Self {
        Self { context }
    }

    /// Send `amount` JPY straight to another user
    ///
    /// POST /bff/v2/executeP2PSendMoney
    ///
    /// # Arguments
    /// * `amount` - Amount in JPY
    /// * `external_receiver_id` - The receiver's external user id
    ///
    /// # Returns
    /// The raw success payload
    pub async fn send_money(
        &self,
        amount: u64,
        external_receiver_id: &str,
    ) -> Result<serde_json::Value, PayPayError> {
        let body = SendMoneyRequest {
            amount,
            external_receiver_id,
            request_at: tokyo_timestamp(),
            request_id: new_request_id(),
            ios_minimum_version: MINIMUM_CLIENT_VERSION,
            android_minimum_version: MINIMUM_CLIENT_VERSION,
            theme: SEND_MONEY_THEME,
        };
        let result = self.context.authorized_post(SEND_MONEY_PATH, &body).await?;
        authorized_value(result)
    }
}

impl PayPayApi for TransferApi {
    fn context(&self) -> &PayPayContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "transfer"
    }
}
