//! Unofficial PayPay SDK for Rust
//!
//! A client for the backend API used by the PayPay iOS app. It signs in
//! with phone number and password (plus an SMS one-time password when the
//! server asks for one) and then queries the wallet and moves money through
//! peer-to-peer links.
//!
//! ## API Coverage
//!
//! | Category | Operations |
//! |----------|------------|
//! | Login / Session | `login`, `complete_otp` |
//! | Wallet | `get_balance`, `get_balance_info`, `get_history` |
//! | P2P Links | `create_link`, `inspect_link`, `accept_link` |
//! | Transfer | `send_money` |
//! | Profile | `get_profile` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paypay_sdk::{LoginResult, PayPay};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let paypay = PayPay::builder().connect().await?;
//!
//!     match paypay.login("09012345678", "password").await? {
//!         LoginResult::Done(_) => {}
//!         LoginResult::OtpRequired(challenge) => {
//!             println!("SMS sent to {}", challenge.otp_prefix);
//!             paypay.complete_otp(&challenge.otp_reference_id, "123456").await?;
//!         }
//!     }
//!
//!     let balance = paypay.get_balance().await?;
//!     println!("Balance: {} JPY", balance.balance);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Sessions
//!
//! Each [`PayPay`] instance is one session. Authorized calls made before
//! login fail with [`PayPayError::SessionNotEstablished`] without touching
//! the network. Tokens are not persisted; read [`PayPay::access_token`] and
//! pass it back through [`PayPayBuilder::access_token`] (together with the
//! same client and device UUIDs) to resume later.
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use paypay_sdk::PayPayError;
//!
//! match paypay.get_balance().await {
//!     Ok(balance) => { /* handle success */ }
//!     Err(PayPayError::TokenRevoked) => {
//!         // log in again; the session is not reset automatically
//!     }
//!     Err(PayPayError::Http(e)) => {
//!         eprintln!("HTTP error: {}", e);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod session;
pub mod types;
pub mod version;
mod utils;

pub use api::{LoginResult, LoginTokens};
pub use client::{DeviceProfile, PayPay, PayPayBuilder, PayPayClient, PayPayClientBuilder};
pub use error::PayPayError;
pub use session::SessionState;
