//! External delivery channels for notifications.
//!
//! The dispatcher talks to channels only through [`EmailChannel`] and
//! [`SmsChannel`], so providers can be swapped or stubbed in tests.

pub mod email;
pub mod sms;

use async_trait::async_trait;

pub use email::EmailError;
pub use sms::{SmsError, SmsReceipt};

/// A rendered email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Outbound email provider.
#[async_trait]
pub trait EmailChannel: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError>;
}

/// Outbound SMS provider.
#[async_trait]
pub trait SmsChannel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Send `body` to `to`. The number is normalised to E.164 by the channel.
    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, SmsError>;
}

/// Failure of any one delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum ChannelDeliveryError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Sms(#[from] SmsError),
}

impl ChannelDeliveryError {
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Sms(_) => "sms",
        }
    }
}
