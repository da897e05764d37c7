//! Payment gateway adapter.
//!
//! - [`PaymentGateway`]: the seam the booking and verification flows
//!   depend on (order creation, signature verification).
//! - [`RazorpayGateway`]: REST client for the Razorpay Orders API.
//! - [`UnconfiguredGateway`]: stand-in used when no credentials are set.

pub mod gateway;
pub mod razorpay;

pub use gateway::{
    CheckoutOrder, GatewayError, OrderRequest, PaymentGateway, Prefill, Theme,
    UnconfiguredGateway,
};
pub use razorpay::{RazorpayConfig, RazorpayGateway};
