//! PayPay P2P Link API
//!
//! Send-money links: create one, inspect a received code, and accept it.

use std::fmt;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::api::common::{
    authorized_payload, OrderType, PayPayUser, MINIMUM_CLIENT_VERSION, SEND_MONEY_THEME,
};
use crate::api::r#trait::{PayPayApi, PayPayContext};
use crate::error::PayPayError;
use crate::types::RemoteResult;
use crate::utils::{new_request_id, tokyo_timestamp};

const CREATE_LINK_PATH: &str = "/bff/v2/executeP2PSendMoneyLink?payPayLang=ja";
const LINK_INFO_PATH: &str = "/bff/v2/getP2PLinkInfo?payPayLang=ja";
const ACCEPT_LINK_PATH: &str = "/bff/v2/acceptP2PSendMoneyLink?payPayLang=ja";

/// Lifecycle state of a link order
///
/// Statuses outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum LinkOrderStatus {
    Pending,
    Success,
    Rejected,
    Expired,
    Other(String),
}

impl LinkOrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for LinkOrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "PENDING" => Self::Pending,
            "SUCCESS" => Self::Success,
            "REJECTED" => Self::Rejected,
            "EXPIRED" => Self::Expired,
            _ => Self::Other(status),
        }
    }
}

impl From<LinkOrderStatus> for String {
    fn from(status: LinkOrderStatus) -> Self {
        match status {
            LinkOrderStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LinkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of executeP2PSendMoneyLink
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLink {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub chat_room_id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub order_status: String,
    /// Shareable `https://pay.paypay.ne.jp/...` URL
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub trans_action_at: String,
    #[serde(default)]
    pub expiry: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingP2PInfo {
    #[serde(default)]
    pub order_id: String,
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub is_set_passcode: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub expired_at: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMessageData {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_link: bool,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub request_money_id: Option<String>,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub transaction_at: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub theme: Option<serde_json::Value>,
    #[serde(default)]
    pub is_qr: Option<bool>,
    #[serde(default)]
    pub sub_wallet_split: Option<serde_json::Value>,
    #[serde(default)]
    pub send_money_link: String,
    #[serde(default)]
    pub send_money_link_passcode: Option<String>,
    #[serde(default)]
    pub sender: Option<PayPayUser>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Chat message that carries the link
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMessage {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub message_type: String,
    #[serde(default)]
    pub custom_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub chat_room_id: String,
    #[serde(default)]
    pub user: Option<PayPayUser>,
    #[serde(default)]
    pub is_removed: bool,
    #[serde(default)]
    pub data: LinkMessageData,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Payload of getP2PLinkInfo
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfo {
    /// Null once the order has left `PENDING`
    #[serde(default, rename = "pendingP2PInfo")]
    pub pending_p2p_info: Option<PendingP2PInfo>,
    pub order_status: LinkOrderStatus,
    #[serde(default)]
    pub sender: Option<PayPayUser>,
    #[serde(default)]
    pub receiver: Option<PayPayUser>,
    #[serde(default)]
    pub message: LinkMessage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLinkRequest<'a> {
    android_minimum_version: &'a str,
    request_at: String,
    theme: &'a str,
    amount: String,
    ios_minimum_version: &'a str,
    request_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AcceptLinkRequest<'a> {
    verification_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    passcode: Option<&'a str>,
    request_id: String,
    request_at: String,
    ios_minimum_version: &'a str,
    android_minimum_version: &'a str,
    order_id: &'a str,
    sender_channel_url: &'a str,
    sender_message_id: &'a str,
}

impl<'a> AcceptLinkRequest<'a> {
    /// Check the inspected link and copy its identifiers into the acceptance body.
    fn from_link_info(
        code: &'a str,
        info: &'a LinkInfo,
        passcode: Option<&'a str>,
    ) -> Result<Self, PayPayError> {
        if info.order_status != LinkOrderStatus::Pending {
            return Err(PayPayError::LinkNotPending {
                status: info.order_status.to_string(),
            });
        }

        let requires_passcode = info
            .pending_p2p_info
            .as_ref()
            .is_some_and(|pending| pending.is_set_passcode);
        let passcode = if requires_passcode {
            match passcode.filter(|p| !p.is_empty()) {
                Some(passcode) => Some(passcode),
                None => return Err(PayPayError::PasscodeRequired),
            }
        } else {
            None
        };

        Ok(Self {
            verification_code: code,
            passcode,
            request_id: new_request_id(),
            request_at: tokyo_timestamp(),
            ios_minimum_version: MINIMUM_CLIENT_VERSION,
            android_minimum_version: MINIMUM_CLIENT_VERSION,
            order_id: &info.message.data.order_id,
            sender_channel_url: &info.message.chat_room_id,
            sender_message_id: &info.message.message_id,
        })
    }
}

/// PayPay P2P link API
pub struct LinkApi {
    context: Arc<PayPayContext>,
}

impl LinkApi {
    /// Create a new LinkApi instance
    pub fn new(context: Arc<PayPayContext>) -> Self {
        Self { context }
    }

    /// Create a send-money link for `amount` JPY
    ///
    /// POST /bff/v2/executeP2PSendMoneyLink
    pub async fn create_link(&self, amount: u64) -> Result<CreatedLink, PayPayError> {
        let body = CreateLinkRequest {
            android_minimum_version: MINIMUM_CLIENT_VERSION,
            request_at: tokyo_timestamp(),
            theme: SEND_MONEY_THEME,
            amount: amount.to_string(),
            ios_minimum_version: MINIMUM_CLIENT_VERSION,
            request_id: new_request_id(),
        };
        let result = self.context.authorized_post(CREATE_LINK_PATH, &body).await?;
        authorized_payload(result)
    }

    /// Inspect a link by its verification code
    ///
    /// GET /bff/v2/getP2PLinkInfo
    pub async fn inspect_link(&self, code: &str) -> Result<LinkInfo, PayPayError> {
        let encoded = utf8_percent_encode(code, NON_ALPHANUMERIC);
        let path = format!("{LINK_INFO_PATH}&verificationCode={encoded}");
        let result = self.context.authorized_get(&path).await?;
        authorized_payload(result)
    }

    /// Accept a received link
    ///
    /// Inspects the link first and only submits the acceptance when the
    /// order is still pending and any required passcode was supplied.
    ///
    /// POST /bff/v2/acceptP2PSendMoneyLink
    ///
    /// # Errors
    /// - `PayPayError::LinkNotPending` when the order already left `PENDING`
    /// - `PayPayError::PasscodeRequired` when the link is protected and no passcode was given
    /// - `PayPayError::TokenRevoked` / `PayPayError::Unknown` for a rejected acceptance
    pub async fn accept_link(
        &self,
        code: &str,
        passcode: Option<&str>,
    ) -> Result<serde_json::Value, PayPayError> {
        let info = self.inspect_link(code).await?;
        let body = AcceptLinkRequest::from_link_info(code, &info, passcode)?;

        let result = self.context.authorized_post(ACCEPT_LINK_PATH, &body).await?;
        match result {
            RemoteResult::Success { payload, .. } => {
                log::info!("[PayPay] accepted link order {}", body.order_id);
                Ok(payload)
            }
            RemoteResult::Error { .. } => Err(PayPayError::TokenRevoked),
            RemoteResult::OtpChallenge { header, .. } | RemoteResult::Unclassified { header } => {
                Err(PayPayError::Unknown {
                    code: header.result_code,
                    message: header.result_message,
                })
            }
        }
    }
}

impl PayPayApi for LinkApi {
    fn context(&self) -> &PayPayContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "link"
    }
}
