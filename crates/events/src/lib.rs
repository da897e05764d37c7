//! Notification dispatch for the Ascend back office.
//!
//! - [`NotificationEvent`]: the business events that produce messages.
//! - [`templates`]: deterministic subject / text / HTML rendering.
//! - [`NotificationDispatcher`]: persists one inbox record per recipient,
//!   then attempts best-effort external delivery.
//! - [`delivery`]: email (SendGrid, SMTP) and SMS (Twilio) channels.

pub mod delivery;
pub mod dispatcher;
pub mod event;
pub mod templates;

pub use delivery::email::{
    EmailConfig, EmailError, SendGridConfig, SendGridEmail, SmtpConfig, SmtpEmail,
};
pub use delivery::sms::{SmsConfig, SmsError, SmsReceipt, TwilioSms};
pub use delivery::{ChannelDeliveryError, EmailChannel, OutboundEmail, SmsChannel};
pub use dispatcher::{DispatcherConfig, NotificationDispatcher};
pub use event::NotificationEvent;
pub use templates::{Audience, RenderedMessage};
