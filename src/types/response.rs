//! Result discrimination for PayPay API responses
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! {"header": {"resultCode": "S0000", "resultMessage": ""}, "payload": {...}}
//! ```
//!
//! [`classify`] turns that untyped envelope into a [`RemoteResult`] so callers
//! match on the variant instead of probing for `payload` or `error`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result codes the client knows how to interpret
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// `S0000`
    Success,
    /// `S1004`, SMS verification is required to finish login
    OtpRequired,
    /// `S0001`
    Error,
    Other(String),
}

impl ResultCode {
    pub const SUCCESS: &'static str = "S0000";
    pub const OTP_REQUIRED: &'static str = "S1004";
    pub const ERROR: &'static str = "S0001";

    pub fn parse(code: &str) -> Self {
        match code {
            Self::SUCCESS => Self::Success,
            Self::OTP_REQUIRED => Self::OtpRequired,
            Self::ERROR => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => Self::SUCCESS,
            Self::OtpRequired => Self::OTP_REQUIRED,
            Self::Error => Self::ERROR,
            Self::Other(code) => code,
        }
    }
}

/// The `header` object present on every response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultHeader {
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub result_message: String,
}

impl ResultHeader {
    pub fn code(&self) -> ResultCode {
        ResultCode::parse(&self.result_code)
    }
}

/// SMS challenge returned by login when the server wants an OTP
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpChallenge {
    /// Handle to resubmit together with the SMS code
    pub otp_reference_id: String,
    /// Masked phone number hint, e.g. `090****1234`
    pub otp_prefix: String,
}

/// One decoded API response, classified by its result code
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResult {
    Success { header: ResultHeader, payload: Value },
    OtpChallenge { header: ResultHeader, challenge: OtpChallenge },
    /// `S0001` carrying an `error` object; in practice a stale or revoked token.
    Error { header: ResultHeader, error: Value },
    Unclassified { header: ResultHeader },
}

impl RemoteResult {
    pub fn header(&self) -> &ResultHeader {
        match self {
            Self::Success { header, .. }
            | Self::OtpChallenge { header, .. }
            | Self::Error { header, .. }
            | Self::Unclassified { header } => header,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Classify a decoded response body.
///
/// Only `header.resultCode` decides the category; `payload` and `error` are
/// read afterwards and only for the category that guarantees them. A
/// challenge whose `error` lacks the OTP fields, or an `S0001` without an
/// `error` value, falls back to [`RemoteResult::Unclassified`].
pub fn classify(mut body: Value) -> RemoteResult {
    let header = body
        .get("header")
        .and_then(|h| ResultHeader::deserialize(h).ok())
        .unwrap_or_default();

    match header.code() {
        ResultCode::Success => {
            let payload = body.get_mut("payload").map(Value::take).unwrap_or(Value::Null);
            RemoteResult::Success { header, payload }
        }
        ResultCode::OtpRequired => {
            let challenge = body
                .get("error")
                .and_then(|e| OtpChallenge::deserialize(e).ok());
            match challenge {
                Some(challenge) => RemoteResult::OtpChallenge { header, challenge },
                None => RemoteResult::Unclassified { header },
            }
        }
        ResultCode::Error => match body.get_mut("error").map(Value::take) {
            Some(error) if !error.is_null() => RemoteResult::Error { header, error },
            _ => RemoteResult::Unclassified { header },
        },
        ResultCode::Other(_) => RemoteResult::Unclassified { header },
    }
}
