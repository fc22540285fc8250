use thiserror::Error;

/// PayPay SDK error types
#[derive(Debug, Error)]
pub enum PayPayError {
    /// An authorized operation was called before login completed.
    #[error("access token has not been set")]
    SessionNotEstablished,

    #[error("an invalid phone number or password was provided")]
    InvalidCredentials,

    #[error("an invalid otp code was provided")]
    InvalidOtp,

    /// The server answered with a classified error, usually a stale or revoked token.
    #[error("access token has been revoked")]
    TokenRevoked,

    #[error("the link is not pending: {status}")]
    LinkNotPending { status: String },

    #[error("the link requires a passcode")]
    PasscodeRequired,

    #[error("PayPay API error (code={code}): {message}")]
    Unknown { code: String, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("App version lookup failed: {0}")]
    VersionLookup(String),
}

impl PayPayError {
    /// Returns `true` when the server reported the bearer token as unusable.
    ///
    /// The session is not demoted when this happens; callers decide whether
    /// to log in again.
    pub fn is_token_revoked(&self) -> bool {
        matches!(self, Self::TokenRevoked)
    }

    /// Returns `true` for failures raised by the HTTP transport itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_not_pending_message_includes_status() {
        let err = PayPayError::LinkNotPending {
            status: "EXPIRED".to_string(),
        };
        assert_eq!(err.to_string(), "the link is not pending: EXPIRED");
    }

    #[test]
    fn test_unknown_carries_server_message() {
        let err = PayPayError::Unknown {
            code: "S9999".to_string(),
            message: "system maintenance".to_string(),
        };
        assert!(err.to_string().contains("system maintenance"));
        assert!(!err.is_token_revoked());
    }

    #[test]
    fn test_kind_helpers() {
        assert!(PayPayError::TokenRevoked.is_token_revoked());
        assert!(!PayPayError::SessionNotEstablished.is_transport());
    }
}
