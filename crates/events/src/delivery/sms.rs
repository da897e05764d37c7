//! SMS delivery through the Twilio Messages API.

use std::time::Duration;

use ascend_core::phone::to_e164;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SmsChannel;

const DEFAULT_API_URL: &str = "https://api.twilio.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Twilio rejects bodies longer than this.
pub const MAX_SMS_LEN: usize = 1600;

#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("Invalid phone number: {0}")]
    InvalidNumber(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("SMS request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("SMS API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected SMS API response: {0}")]
    UnexpectedResponse(String),
}

/// Twilio account credentials and sender number.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number in E.164.
    pub from_number: String,
    pub api_url: String,
}

impl SmsConfig {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// `None` unless `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, and
    /// `TWILIO_PHONE_NUMBER` are all set. `TWILIO_API_URL` overrides the host.
    pub fn from_env() -> Option<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let mut config = Self::new(
            var("TWILIO_ACCOUNT_SID")?,
            var("TWILIO_AUTH_TOKEN")?,
            var("TWILIO_PHONE_NUMBER")?,
        );
        if let Some(url) = var("TWILIO_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        Some(config)
    }
}

/// What the provider reported for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsReceipt {
    pub sid: String,
    pub status: String,
    pub to: String,
}

pub struct TwilioSms {
    client: reqwest::Client,
    config: SmsConfig,
}

impl TwilioSms {
    pub fn new(config: SmsConfig) -> Result<Self, SmsError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SmsChannel for TwilioSms {
    fn name(&self) -> &'static str {
        "twilio"
    }

    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, SmsError> {
        let to = to_e164(to).ok_or_else(|| SmsError::InvalidNumber(to.to_string()))?;
        if body.trim().is_empty() {
            return Err(SmsError::InvalidMessage("message is empty".into()));
        }
        if body.chars().count() > MAX_SMS_LEN {
            return Err(SmsError::InvalidMessage(format!(
                "message exceeds {MAX_SMS_LEN} characters"
            )));
        }

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_url, self.config.account_sid
        );
        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SmsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let receipt: SmsReceipt = serde_json::from_str(&text)
            .map_err(|e| SmsError::UnexpectedResponse(e.to_string()))?;
        tracing::info!(sid = %receipt.sid, to = %receipt.to, "SMS sent");
        Ok(receipt)
    }
}
