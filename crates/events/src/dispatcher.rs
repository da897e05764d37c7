//! Fan-out of business events to the admin inbox and the customer.
//!
//! For every recipient the dispatcher renders the message, stores one
//! [`Notification`], then tries each configured external channel once.
//! Channel failures are logged and never reach the caller.

use std::sync::Arc;

use ascend_db::models::notification::{NewNotification, Notification};
use ascend_db::{DynStore, NotificationStore};

use crate::delivery::{ChannelDeliveryError, EmailChannel, OutboundEmail, SmsChannel};
use crate::event::NotificationEvent;
use crate::templates::{self, Audience, RenderedMessage};

const DEFAULT_ADMIN_EMAIL: &str = "admin@ascendcoaching.in";

/// Recipient addresses owned by the business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Inbox address every admin notification is stored under.
    pub admin_email: String,
    /// Forwarding number for admin SMS alerts.
    pub admin_phone: Option<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_phone: None,
        }
    }
}

impl DispatcherConfig {
    /// Reads `ADMIN_EMAIL` and `ADMIN_PHONE_NUMBER`.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            admin_email: var("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_phone: var("ADMIN_PHONE_NUMBER"),
        }
    }
}

/// Renders, persists, and delivers notifications.
pub struct NotificationDispatcher {
    store: DynStore,
    email: Option<Arc<dyn EmailChannel>>,
    sms: Option<Arc<dyn SmsChannel>>,
    config: DispatcherConfig,
}

impl NotificationDispatcher {
    /// A dispatcher with no external channels; notifications are only stored.
    pub fn new(store: DynStore, config: DispatcherConfig) -> Self {
        Self {
            store,
            email: None,
            sms: None,
            config,
        }
    }

    pub fn with_email(mut self, channel: Arc<dyn EmailChannel>) -> Self {
        self.email = Some(channel);
        self
    }

    pub fn with_sms(mut self, channel: Arc<dyn SmsChannel>) -> Self {
        self.sms = Some(channel);
        self
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Process one event and return the notifications that were stored.
    ///
    /// The admin always receives one; the customer receives one only when a
    /// deliverable email is on file.
    pub async fn dispatch(&self, event: &NotificationEvent) -> Vec<Notification> {
        let mut stored = Vec::with_capacity(2);

        let admin = Recipient {
            audience: Audience::Admin,
            email: self.config.admin_email.clone(),
            phone: self.config.admin_phone.clone(),
        };
        stored.extend(self.deliver(event, admin).await);

        if let Some(email) = event.customer_email() {
            let customer = Recipient {
                audience: Audience::Customer,
                email: email.to_string(),
                phone: event.customer_phone().map(str::to_string),
            };
            stored.extend(self.deliver(event, customer).await);
        }

        tracing::debug!(
            event = event.name(),
            stored = stored.len(),
            "Notification event dispatched"
        );
        stored
    }

    async fn deliver(&self, event: &NotificationEvent, recipient: Recipient) -> Option<Notification> {
        let rendered = templates::render(event, recipient.audience);

        let notification = match self
            .store
            .create_notification(NewNotification {
                notification_type: event.notification_type(),
                recipient: recipient.email.clone(),
                subject: rendered.subject.clone(),
                text_content: rendered.text.clone(),
                html_content: rendered.html.clone(),
                metadata: event.metadata(),
            })
            .await
        {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event = event.name(),
                    audience = recipient.audience.as_str(),
                    "Failed to store notification"
                );
                return None;
            }
        };

        for result in self.send_external(&recipient, &rendered).await {
            if let Err(e) = result {
                tracing::warn!(
                    error = %e,
                    channel = e.channel(),
                    event = event.name(),
                    notification_id = %notification.id,
                    audience = recipient.audience.as_str(),
                    "Notification delivery failed",
                );
            }
        }

        Some(notification)
    }

    /// One attempt per configured channel.
    async fn send_external(
        &self,
        recipient: &Recipient,
        rendered: &RenderedMessage,
    ) -> Vec<Result<(), ChannelDeliveryError>> {
        let mut results = Vec::new();

        if let Some(email) = &self.email {
            let outbound = OutboundEmail {
                to: recipient.email.clone(),
                subject: rendered.subject.clone(),
                text: rendered.text.clone(),
                html: rendered.html.clone(),
            };
            results.push(email.send(&outbound).await.map_err(ChannelDeliveryError::from));
        }

        if let (Some(sms), Some(phone)) = (&self.sms, &recipient.phone) {
            results.push(
                sms.send(phone, &rendered.sms)
                    .await
                    .map(|_| ())
                    .map_err(ChannelDeliveryError::from),
            );
        }

        results
    }
}

struct Recipient {
    audience: Audience,
    email: String,
    phone: Option<String>,
}
