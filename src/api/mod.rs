//! PayPay API modules
//!
//! - [`common`] - Shared constants, user/order types and result mapping
//! - [`auth`] - Password sign-in and SMS OTP completion
//! - [`wallet`] - Balance and payment history
//! - [`link`] - Send-money links (create, inspect, accept)
//! - [`transfer`] - Direct transfers to another user
//! - [`profile`] - Account profile

pub mod auth;
pub mod common;
pub mod link;
pub mod profile;
pub mod r#trait;
pub mod transfer;
pub mod wallet;

pub use auth::{AuthApi, LoginResult, LoginTokens};
pub use common::{OrderType, PayPayUser};
pub use link::{CreatedLink, LinkApi, LinkInfo, LinkMessage, LinkOrderStatus, PendingP2PInfo};
pub use profile::{Profile, ProfileApi, UserProfile};
pub use r#trait::{PayPayApi, PayPayContext};
pub use transfer::TransferApi;
pub use wallet::{Balance, BalanceInfo, History, TransactionRecord, WalletApi};
