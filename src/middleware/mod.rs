//! Middleware components for the PayPay SDK.
//!
//! Middleware wraps the HTTP transport using Tower patterns and is installed
//! with [`PayPayBuilder::with_middleware`](crate::PayPayBuilder::with_middleware).
//!
//! ## Usage
//!
//! ```ignore
//! use paypay_sdk::{middleware::LoggingMiddleware, PayPay};
//!
//! let paypay = PayPay::builder()
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
