//! PayPay Authentication API
//!
//! Phone number + password sign-in and the SMS one-time-password step.

use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::r#trait::{PayPayApi, PayPayContext};
use crate::error::PayPayError;
use crate::types::{AccessToken, OtpChallenge, RemoteResult};

const SIGN_IN_PATH: &str = "/bff/v1/signIn?payPayLang=ja";
const SIGN_IN_WITH_SMS_PATH: &str = "/bff/v1/signInWithSms?payPayLang=ja";

/// Tokens issued by a completed login
#[non_exhaustive]
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl std::fmt::Debug for LoginTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Outcome of [`AuthApi::login`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    /// Login finished and the session now holds the access token.
    Done(LoginTokens),
    /// The server sent an SMS; pass the challenge to [`AuthApi::complete_otp`].
    OtpRequired(OtpChallenge),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    phone_number: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithSmsRequest<'a> {
    otp: &'a str,
    otp_reference_id: &'a str,
}

/// PayPay authentication API
pub struct AuthApi {
    context: Arc<PayPayContext>,
}

impl AuthApi {
    /// Create a new AuthApi instance
    pub fn new(context: Arc<PayPayContext>) -> Self {
        Self { context }
    }

    fn store_tokens(&self, tokens: &LoginTokens, on_empty: PayPayError) -> Result<(), PayPayError> {
        let token = AccessToken::new(tokens.access_token.as_str()).map_err(|_| on_empty)?;
        self.context.session.set_access_token(token);
        Ok(())
    }

    /// Sign in with phone number and password
    ///
    /// POST /bff/v1/signIn
    ///
    /// Returns [`LoginResult::OtpRequired`] when the server wants an SMS
    /// code; the session stays anonymous until [`complete_otp`](Self::complete_otp)
    /// succeeds.
    ///
    /// # Errors
    /// - `PayPayError::InvalidCredentials` for any other result code
    pub async fn login(&self, phone_number: &str, password: &str) -> Result<LoginResult, PayPayError> {
        let body = SignInRequest {
            phone_number,
            password,
        };
        let result = self
            .context
            .send(Method::POST, SIGN_IN_PATH, Some(&body), None)
            .await?;

        match result {
            RemoteResult::OtpChallenge { challenge, .. } => {
                log::info!(
                    "[PayPay] login requires otp (prefix {})",
                    challenge.otp_prefix
                );
                Ok(LoginResult::OtpRequired(challenge))
            }
            RemoteResult::Success { payload, .. } => {
                let tokens: LoginTokens =
                    serde_json::from_value(payload).map_err(|_| PayPayError::InvalidCredentials)?;
                self.store_tokens(&tokens, PayPayError::InvalidCredentials)?;
                log::info!("[PayPay] login completed");
                Ok(LoginResult::Done(tokens))
            }
            RemoteResult::Error { header, .. } | RemoteResult::Unclassified { header } => {
                log::debug!(
                    "[PayPay] login rejected: {} {}",
                    header.result_code,
                    header.result_message
                );
                Err(PayPayError::InvalidCredentials)
            }
        }
    }

    /// Complete a login with the SMS code
    ///
    /// POST /bff/v1/signInWithSms
    ///
    /// On success the session becomes authenticated regardless of its
    /// previous state.
    ///
    /// # Errors
    /// - `PayPayError::InvalidOtp` for any non-success result
    pub async fn complete_otp(
        &self,
        otp_reference_id: &str,
        otp: &str,
    ) -> Result<LoginTokens, PayPayError> {
        let body = SignInWithSmsRequest {
            otp,
            otp_reference_id,
        };
        let result = self
            .context
            .send(Method::POST, SIGN_IN_WITH_SMS_PATH, Some(&body), None)
            .await?;

        let RemoteResult::Success { payload, .. } = result else {
            return Err(PayPayError::InvalidOtp);
        };
        let tokens: LoginTokens =
            serde_json::from_value(payload).map_err(|_| PayPayError::InvalidOtp)?;
        self.store_tokens(&tokens, PayPayError::InvalidOtp)?;
        log::info!("[PayPay] otp login completed");

        Ok(tokens)
    }
}

impl PayPayApi for AuthApi {
    fn context(&self) -> &PayPayContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "auth"
    }
}
