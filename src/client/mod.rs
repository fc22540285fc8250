//! PayPay HTTP Client module
//!
//! This module contains the transport client, the simulated device profile
//! and the unified [`PayPay`] session client.

mod paypay_client;
pub use paypay_client::{PayPayClient, PayPayClientBuilder};

mod device;
pub(crate) use device::ClientIdentity;
pub use device::DeviceProfile;

mod paypay;
pub use paypay::PayPay;

mod builder;
pub use builder::PayPayBuilder;
