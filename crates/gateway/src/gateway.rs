//! Provider-neutral gateway types and the [`PaymentGateway`] trait.

use ascend_core::validation::FieldErrors;
use async_trait::async_trait;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the payment gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The order request is missing required fields. Nothing was sent.
    #[error("Invalid order request: {0}")]
    InvalidRequest(String),

    /// No gateway credentials are configured.
    #[error("Payment gateway is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Gateway API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered 2xx with a body we could not interpret.
    #[error("Unexpected gateway response: {0}")]
    UnexpectedResponse(String),
}

// ---------------------------------------------------------------------------
// Order request / checkout payload
// ---------------------------------------------------------------------------

/// What the caller wants to charge for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Whole currency units; the gateway is asked for `amount * 100`.
    pub amount: i64,
    pub package_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub package_name: String,
}

impl OrderRequest {
    /// Reject requests missing an amount, package, or customer identity.
    pub fn validate(&self) -> Result<(), GatewayError> {
        let mut errors = FieldErrors::new();
        if self.amount <= 0 {
            errors.add("amount", "must be positive");
        }
        errors.require("packageId", &self.package_id);
        errors.require("customerName", &self.customer_name);
        errors.require("customerEmail", &self.customer_email);
        errors
            .into_result()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))
    }
}

/// Customer details the hosted checkout pre-fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// Hosted checkout colour scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub color: String,
}

/// Everything the browser needs to open the gateway's checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrder {
    /// Gateway order id; joins the payment and booking records.
    pub order_id: String,
    /// Minor units (paise).
    pub amount: i64,
    pub currency: String,
    /// Public key id for the client SDK.
    pub key: String,
    /// Merchant display name.
    pub name: String,
    pub description: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A payment provider able to raise orders and check payment signatures.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Raise an order for `request.amount` whole units.
    async fn create_order(&self, request: &OrderRequest) -> Result<CheckoutOrder, GatewayError>;

    /// Check the signature the provider issued for a completed payment.
    ///
    /// A `false` result is final and must not be retried.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}

/// Gateway used when no credentials are configured.
///
/// Order creation fails with [`GatewayError::NotConfigured`] and every
/// signature is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredGateway;

#[async_trait]
impl PaymentGateway for UnconfiguredGateway {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<CheckoutOrder, GatewayError> {
        request.validate()?;
        Err(GatewayError::NotConfigured)
    }

    fn verify_signature(&self, _order_id: &str, _payment_id: &str, _signature: &str) -> bool {
        false
    }
}
