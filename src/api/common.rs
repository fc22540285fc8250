//! Common API primitives
//!
//! Shared constants and the result mapping used by every authorized call.
//!
//! An authorized call succeeds only on `S0000`. A classified error
//! (`S0001` with an `error` object) becomes [`PayPayError::TokenRevoked`];
//! anything else becomes [`PayPayError::Unknown`] carrying the server message.
//! The session is left authenticated in both cases.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PayPayError;
use crate::types::{RemoteResult, ResultHeader};

/// Minimum app versions the backend expects in money-moving requests
pub(crate) const MINIMUM_CLIENT_VERSION: &str = "2.55.0";

/// Theme attached to send-money links and transfers
pub(crate) const SEND_MONEY_THEME: &str = "default-sendmoney";

/// A PayPay user as shown on links and chat messages
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPayUser {
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub photo_url: String,
}

/// Transaction category used in history entries and link info
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    #[serde(rename = "P2PRECEIVE")]
    P2pReceive,
    Refund,
    #[serde(rename = "TOPUP")]
    TopUp,
    Cashback,
    #[serde(rename = "P2PSEND")]
    P2pSend,
    Acquiring,
    #[serde(other)]
    Unknown,
}

fn unknown(header: &ResultHeader) -> PayPayError {
    PayPayError::Unknown {
        code: header.result_code.clone(),
        message: header.result_message.clone(),
    }
}

/// Map an authorized call's result to its raw success payload.
pub(crate) fn authorized_value(result: RemoteResult) -> Result<serde_json::Value, PayPayError> {
    match result {
        RemoteResult::Success { payload, .. } => Ok(payload),
        RemoteResult::Error { .. } => Err(PayPayError::TokenRevoked),
        RemoteResult::OtpChallenge { header, .. } | RemoteResult::Unclassified { header } => {
            Err(unknown(&header))
        }
    }
}

/// Map an authorized call's result to a typed success payload.
pub(crate) fn authorized_payload<T: DeserializeOwned>(
    result: RemoteResult,
) -> Result<T, PayPayError> {
    let payload = authorized_value(result)?;
    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::types::classify;

    #[derive(Debug, Deserialize)]
    struct Sample {
        value: i32,
    }

    #[test]
    fn test_authorized_payload_success() {
        let result = classify(json!({
            "header": {"resultCode": "S0000"},
            "payload": {"value": 7}
        }));
        let sample: Sample = authorized_payload(result).unwrap();
        assert_eq!(sample.value, 7);
    }

    #[test]
    fn test_authorized_payload_revoked() {
        let result = classify(json!({
            "header": {"resultCode": "S0001", "resultMessage": "invalid token"},
            "error": {}
        }));
        let err = authorized_payload::<Sample>(result).unwrap_err();
        assert!(err.is_token_revoked());
    }

    #[test]
    fn test_authorized_payload_unknown_keeps_message() {
        let result = classify(json!({
            "header": {"resultCode": "S2000", "resultMessage": "insufficient balance"}
        }));
        match authorized_payload::<Sample>(result) {
            Err(PayPayError::Unknown { code, message }) => {
                assert_eq!(code, "S2000");
                assert_eq!(message, "insufficient balance");
            }
            other => panic!("expected unknown error, got {:?}", other),
        }
    }

    #[test]
    fn test_authorized_payload_shape_mismatch_is_json_error() {
        let result = classify(json!({
            "header": {"resultCode": "S0000"},
            "payload": {"other": true}
        }));
        assert!(matches!(
            authorized_payload::<Sample>(result),
            Err(PayPayError::Json(_))
        ));
    }

    #[test]
    fn test_order_type_parse() {
        let types: Vec<OrderType> = serde_json::from_value(json!([
            "P2PRECEIVE", "REFUND", "TOPUP", "CASHBACK", "P2PSEND", "ACQUIRING", "SOMETHING_NEW"
        ]))
        .unwrap();
        assert_eq!(
            types,
            vec![
                OrderType::P2pReceive,
                OrderType::Refund,
                OrderType::TopUp,
                OrderType::Cashback,
                OrderType::P2pSend,
                OrderType::Acquiring,
                OrderType::Unknown,
            ]
        );
    }

    #[test]
    fn test_paypay_user_defaults() {
        let user: PayPayUser = serde_json::from_value(json!({"displayName": "Taro"})).unwrap();
        assert_eq!(user.display_name, "Taro");
        assert!(user.external_id.is_empty());
    }
}
