//! PayPay Wallet API
//!
//! Balance and payment history.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{authorized_payload, OrderType};
use crate::api::r#trait::{PayPayApi, PayPayContext};
use crate::error::PayPayError;

const BALANCE_PATH: &str = "/bff/v1/getBalanceInfo?includeKycInfo=false&includePending=false&includePendingBonusLite=false&noCache=true&payPayLang=ja";
const HISTORY_PATH: &str = "/bff/v2/getPay2BalanceHistory";

pub const DEFAULT_HISTORY_PAGE_SIZE: u32 = 40;

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAmount {
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub currency: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsableBalance {
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub usable: bool,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    #[serde(default)]
    pub all_total_balance_info: BalanceAmount,
    #[serde(default)]
    pub total_balance_info: BalanceAmount,
    #[serde(default)]
    pub transferable_balance_info: BalanceAmount,
    #[serde(default)]
    pub payoutable_balance_info: BalanceAmount,
}

/// Per-wallet breakdown; absent wallets are `None`
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDetail {
    #[serde(default)]
    pub emoney_balance_info: Option<UsableBalance>,
    #[serde(default)]
    pub prepaid_balance_info: Option<UsableBalance>,
    #[serde(default)]
    pub cash_back_balance_info: Option<UsableBalance>,
    #[serde(default)]
    pub cash_back_expirable_balance_info: Option<UsableBalance>,
    #[serde(default)]
    pub cash_back_pending_info: Option<UsableBalance>,
    #[serde(default)]
    pub cash_back_pending_bonus_lite_info: Option<UsableBalance>,
    #[serde(default)]
    pub pre_auth_balance_info: Option<UsableBalance>,
}

/// Full payload of getBalanceInfo
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInfo {
    #[serde(default)]
    pub wallet_summary: WalletSummary,
    #[serde(default)]
    pub wallet_detail: WalletDetail,
}

/// Balance summary in JPY
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub balance: i64,
    pub prepaid: Option<i64>,
    pub cashback: Option<i64>,
}

impl From<&BalanceInfo> for Balance {
    fn from(info: &BalanceInfo) -> Self {
        let detail = &info.wallet_detail;
        Self {
            balance: info.wallet_summary.all_total_balance_info.balance,
            prepaid: detail.prepaid_balance_info.as_ref().map(|b| b.balance),
            cashback: detail.cash_back_balance_info.as_ref().map(|b| b.balance),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountDetail {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub amount: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub details: Vec<AmountDetail>,
}

/// One entry of the payment history
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    /// UTC, e.g. `2024-01-01T00:00:00Z`
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub total_amount: i64,
    pub order_type: OrderType,
    #[serde(default)]
    pub order_status: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub amount_list: Vec<AmountEntry>,
    #[serde(default)]
    pub display_method_info_list: Vec<serde_json::Value>,
    #[serde(default)]
    pub status_label_string: String,
    #[serde(default)]
    pub status_label_color: String,
    #[serde(default)]
    pub funds_transfer_license: String,
    #[serde(default)]
    pub history_id: String,
}

/// One page of payment history
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(default)]
    pub last_sequence: i64,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub payment_info_list: Vec<TransactionRecord>,
}

/// PayPay wallet API
pub struct WalletApi {
    context: Arc<PayPayContext>,
}

impl WalletApi {
    /// Create a new WalletApi instance
    pub fn new(context: Arc<PayPayContext>) -> Self {
        Self { context }
    }

    /// Get the full balance breakdown
    ///
    /// GET /bff/v1/getBalanceInfo
    pub async fn get_balance_info(&self) -> Result<BalanceInfo, PayPayError> {
        let result = self.context.authorized_get(BALANCE_PATH).await?;
        authorized_payload(result)
    }

    /// Get the balance summary
    pub async fn get_balance(&self) -> Result<Balance, PayPayError> {
        let info = self.get_balance_info().await?;
        Ok(Balance::from(&info))
    }

    /// Get one page of payment history
    ///
    /// GET /bff/v2/getPay2BalanceHistory
    pub async fn get_history(&self, page_size: u32) -> Result<History, PayPayError> {
        let path = format!("{HISTORY_PATH}?pageSize={page_size}&payPayLang=ja");
        let result = self.context.authorized_get(&path).await?;
        authorized_payload(result)
    }
}

impl PayPayApi for WalletApi {
    fn context(&self) -> &PayPayContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "wallet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_from_info() {
        let info: BalanceInfo = serde_json::from_value(json!({
            "walletSummary": {
                "allTotalBalanceInfo": {"balance": 1500, "currency": "JPY"},
                "totalBalanceInfo": {"balance": 1500, "currency": "JPY"},
                "transferableBalanceInfo": {"balance": 1000, "currency": "JPY"},
                "payoutableBalanceInfo": {"balance": 0, "currency": "JPY"}
            },
            "walletDetail": {
                "emoneyBalanceInfo": null,
                "prepaidBalanceInfo": {"balance": 1000, "currency": "JPY", "usable": true},
                "cashBackBalanceInfo": {"balance": 500, "currency": "JPY", "usable": true}
            }
        }))
        .unwrap();

        let balance = Balance::from(&info);
        assert_eq!(balance.balance, 1500);
        assert_eq!(balance.prepaid, Some(1000));
        assert_eq!(balance.cashback, Some(500));
        assert!(info.wallet_detail.emoney_balance_info.is_none());
    }

    #[test]
    fn test_balance_missing_wallets() {
        let info: BalanceInfo = serde_json::from_value(json!({
            "walletSummary": {"allTotalBalanceInfo": {"balance": 10, "currency": "JPY"}},
            "walletDetail": {}
        }))
        .unwrap();

        let balance = Balance::from(&info);
        assert_eq!(balance.balance, 10);
        assert_eq!(balance.prepaid, None);
        assert_eq!(balance.cashback, None);
    }

    #[test]
    fn test_history_parse() {
        let history: History = serde_json::from_value(json!({
            "lastSequence": 123,
            "hasNextPage": true,
            "paymentInfoList": [{
                "imageUrl": "https://example.com/a.png",
                "description": "Taro",
                "dateTime": "2024-01-01T00:00:00Z",
                "totalAmount": 500,
                "orderType": "P2PRECEIVE",
                "orderStatus": "COMPLETED",
                "orderId": "O1",
                "amountList": [{"label": "PayPay Money", "amount": 500, "details": []}],
                "displayMethodInfoList": [],
                "statusLabelString": "受け取り",
                "statusLabelColor": "#000000",
                "fundsTransferLicense": "",
                "historyId": "H1"
            }]
        }))
        .unwrap();

        assert_eq!(history.last_sequence, 123);
        assert!(history.has_next_page);
        let record = &history.payment_info_list[0];
        assert_eq!(record.order_type, OrderType::P2pReceive);
        assert_eq!(record.total_amount, 500);
        assert_eq!(record.amount_list[0].amount, 500);
    }
}
