//! Razorpay Orders API client.
//!
//! Orders are created with `POST {api_url}/orders` using HTTP basic auth
//! (`key_id:key_secret`). Payment signatures are verified locally with the
//! key secret; no network call is involved.

use std::time::Duration;

use ascend_core::payment::{to_minor_units, CURRENCY};
use ascend_core::signature::verify_payment_signature;
use async_trait::async_trait;
use serde::Deserialize;

use crate::gateway::{
    CheckoutOrder, GatewayError, OrderRequest, PaymentGateway, Prefill, Theme,
};

/// Default production API base URL.
const DEFAULT_API_URL: &str = "https://api.razorpay.com/v1";

/// Default merchant name shown on the hosted checkout.
const DEFAULT_BUSINESS_NAME: &str = "Ascend Career Coaching";

/// Checkout accent colour.
const DEFAULT_THEME_COLOR: &str = "#1e3a8a";

/// HTTP request timeout for a single order creation.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Razorpay limits receipts to 40 characters.
const MAX_RECEIPT_LEN: usize = 40;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Credentials and presentation settings for Razorpay.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    /// API base URL without trailing slash.
    pub api_url: String,
    pub business_name: String,
    pub theme_color: String,
}

impl RazorpayConfig {
    /// Build a config with default URL and branding.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `RAZORPAY_KEY_ID` and `RAZORPAY_KEY_SECRET`
    /// are set and non-empty.
    ///
    /// | Variable              | Required | Default                        |
    /// |-----------------------|----------|--------------------------------|
    /// | `RAZORPAY_KEY_ID`     | yes      | -                              |
    /// | `RAZORPAY_KEY_SECRET` | yes      | -                              |
    /// | `RAZORPAY_API_URL`    | no       | `https://api.razorpay.com/v1`  |
    /// | `BUSINESS_NAME`       | no       | `Ascend Career Coaching`       |
    /// | `CHECKOUT_THEME_COLOR`| no       | `#1e3a8a`                      |
    pub fn from_env() -> Option<Self> {
        let key_id = std::env::var("RAZORPAY_KEY_ID").ok().filter(|v| !v.is_empty())?;
        let key_secret = std::env::var("RAZORPAY_KEY_SECRET")
            .ok()
            .filter(|v| !v.is_empty())?;
        let mut config = Self::new(key_id, key_secret);
        if let Ok(url) = std::env::var("RAZORPAY_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(name) = std::env::var("BUSINESS_NAME") {
            config.business_name = name;
        }
        if let Ok(color) = std::env::var("CHECKOUT_THEME_COLOR") {
            config.theme_color = color;
        }
        Some(config)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The subset of the order resource we read back.
#[derive(Debug, Deserialize)]
struct RemoteOrder {
    id: String,
    amount: i64,
    currency: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Razorpay implementation of [`PaymentGateway`].
pub struct RazorpayGateway {
    client: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: RazorpayConfig) -> Self {
        Self { client, config }
    }

    /// Receipt tag for an order. Only ASCII alphanumerics, `-` and `_` of
    /// the package id are kept, so byte truncation stays on a char boundary.
    fn receipt(package_id: &str) -> String {
        let tag: String = package_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        let mut receipt = format!("rcpt_{}_{}", chrono::Utc::now().timestamp_millis(), tag);
        receipt.truncate(MAX_RECEIPT_LEN);
        receipt
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn name(&self) -> &'static str {
        "razorpay"
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<CheckoutOrder, GatewayError> {
        request.validate()?;
        let amount_minor = to_minor_units(request.amount)
            .ok_or_else(|| GatewayError::InvalidRequest("amount is too large".into()))?;

        let body = serde_json::json!({
            "amount": amount_minor,
            "currency": CURRENCY,
            "receipt": Self::receipt(&request.package_id),
            "notes": {
                "packageId": request.package_id,
                "packageName": request.package_name,
                "customerName": request.customer_name,
                "customerEmail": request.customer_email,
            },
        });

        let response = self
            .client
            .post(format!("{}/orders", self.config.api_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let order: RemoteOrder = serde_json::from_str(&text)
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;

        tracing::info!(
            order_id = %order.id,
            amount = order.amount,
            package_id = %request.package_id,
            "Gateway order created",
        );

        let description = if request.package_name.trim().is_empty() {
            request.package_id.clone()
        } else {
            request.package_name.clone()
        };

        Ok(CheckoutOrder {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key: self.config.key_id.clone(),
            name: self.config.business_name.clone(),
            description,
            prefill: Prefill {
                name: request.customer_name.clone(),
                email: request.customer_email.clone(),
                contact: None,
            },
            theme: Theme {
                color: self.config.theme_color.clone(),
            },
        })
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(&self.config.key_secret, order_id, payment_id, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_is_bounded() {
        let receipt = RazorpayGateway::receipt("a-very-long-package-identifier-for-testing");
        assert!(receipt.starts_with("rcpt_"));
        assert!(receipt.len() <= MAX_RECEIPT_LEN);
    }

    #[test]
    fn receipt_drops_non_ascii_package_characters() {
        let receipt = RazorpayGateway::receipt("aaaaaaaaaaaaaaaaaaaaéééééééééé");
        assert!(receipt.is_ascii());
        assert!(receipt.ends_with("_aaaaaaaaaaaaaaaaaaaa"));
        assert!(receipt.len() <= MAX_RECEIPT_LEN);

        let receipt = RazorpayGateway::receipt("ascend-ñ-professional-programme-2026");
        assert!(receipt.is_ascii());
        assert!(receipt.len() <= MAX_RECEIPT_LEN);
    }

    #[test]
    fn verify_uses_key_secret() {
        let gateway = RazorpayGateway::new(RazorpayConfig::new("key", "secret")).unwrap();
        let sig = ascend_core::signature::compute_payment_signature("secret", "order_1", "pay_1");
        assert!(gateway.verify_signature("order_1", "pay_1", &sig));
        assert!(!gateway.verify_signature("order_1", "pay_2", &sig));
    }
}
