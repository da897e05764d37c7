//! Business events that produce notifications.

use ascend_core::booking::{BookingStatus, BookingType, CareerStage};
use ascend_core::notification::NotificationType;
use ascend_core::types::EntityId;
use ascend_core::validation::is_deliverable_email;
use ascend_db::models::booking::Booking;
use ascend_db::models::contact::ContactSubmission;
use ascend_db::models::content::Resource;
use ascend_db::models::payment::Payment;
use serde::Serialize;

/// A contact-form inquiry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub submission_id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_interest: Option<String>,
    pub message: String,
}

/// Customer-facing booking fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub booking_id: EntityId,
    pub full_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub package_name: String,
    pub booking_type: BookingType,
    pub amount: Option<i64>,
    pub current_stage: CareerStage,
    pub status: BookingStatus,
    pub order_id: Option<String>,
}

/// A verified gateway payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub payment_id: EntityId,
    pub customer_name: String,
    pub customer_email: String,
    pub amount: i64,
    pub package_id: String,
    pub package_name: Option<String>,
    pub order_id: String,
    pub gateway_payment_id: Option<String>,
}

/// A gated resource download.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDetails {
    pub resource_id: EntityId,
    pub resource_title: String,
    pub media_url: String,
    pub name: String,
    pub email: String,
}

/// Something happened that the admin (and possibly the customer) should hear about.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    Contact(ContactDetails),
    BookingCreated(BookingDetails),
    BookingCompleted(BookingDetails),
    PaymentCompleted(PaymentDetails),
    ResourceDownload(DownloadDetails),
}

impl NotificationEvent {
    pub fn contact(submission: &ContactSubmission) -> Self {
        Self::Contact(ContactDetails {
            submission_id: submission.id.clone(),
            name: submission.full_name(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            service_interest: submission.service_interest.clone(),
            message: submission.message.clone(),
        })
    }

    pub fn booking_created(booking: &Booking) -> Self {
        Self::BookingCreated(BookingDetails::from(booking))
    }

    pub fn booking_completed(booking: &Booking) -> Self {
        Self::BookingCompleted(BookingDetails::from(booking))
    }

    pub fn payment_completed(payment: &Payment, package_name: Option<&str>) -> Self {
        Self::PaymentCompleted(PaymentDetails {
            payment_id: payment.id.clone(),
            customer_name: payment.customer_name.clone(),
            customer_email: payment.customer_email.clone(),
            amount: payment.amount,
            package_id: payment.package_id.clone(),
            package_name: package_name.map(str::to_string),
            order_id: payment.external_order_id.clone(),
            gateway_payment_id: payment.external_payment_id.clone(),
        })
    }

    pub fn resource_download(resource: &Resource, name: &str, email: &str) -> Self {
        Self::ResourceDownload(DownloadDetails {
            resource_id: resource.id.clone(),
            resource_title: resource.title.clone(),
            media_url: resource.media_url.clone(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        })
    }

    /// Stable event name recorded in notification metadata.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contact(_) => "contact_submitted",
            Self::BookingCreated(_) => "booking_created",
            Self::BookingCompleted(_) => "booking_completed",
            Self::PaymentCompleted(_) => "payment_completed",
            Self::ResourceDownload(_) => "resource_download",
        }
    }

    pub fn notification_type(&self) -> NotificationType {
        match self {
            Self::Contact(_) => NotificationType::Contact,
            Self::BookingCreated(_) | Self::BookingCompleted(_) => NotificationType::Booking,
            Self::PaymentCompleted(_) => NotificationType::Payment,
            Self::ResourceDownload(_) => NotificationType::ResourceDownload,
        }
    }

    /// The customer's address, if it is real enough to write to.
    pub fn customer_email(&self) -> Option<&str> {
        let email = match self {
            Self::Contact(d) => Some(d.email.as_str()),
            Self::BookingCreated(d) | Self::BookingCompleted(d) => d.email.as_deref(),
            Self::PaymentCompleted(d) => Some(d.customer_email.as_str()),
            Self::ResourceDownload(d) => Some(d.email.as_str()),
        }?;
        is_deliverable_email(email).then_some(email)
    }

    /// The customer's phone number, if one was given.
    pub fn customer_phone(&self) -> Option<&str> {
        match self {
            Self::Contact(d) => d.phone.as_deref().filter(|p| !p.trim().is_empty()),
            Self::BookingCreated(d) | Self::BookingCompleted(d) => Some(d.mobile.as_str()),
            Self::PaymentCompleted(_) | Self::ResourceDownload(_) => None,
        }
    }

    /// Structured payload stored alongside each notification.
    pub fn metadata(&self) -> serde_json::Value {
        let details = match self {
            Self::Contact(d) => serde_json::to_value(d),
            Self::BookingCreated(d) | Self::BookingCompleted(d) => serde_json::to_value(d),
            Self::PaymentCompleted(d) => serde_json::to_value(d),
            Self::ResourceDownload(d) => serde_json::to_value(d),
        };
        let mut value = details.unwrap_or_else(|_| serde_json::json!({}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("event".to_string(), self.name().into());
        }
        value
    }
}

impl From<&Booking> for BookingDetails {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.clone(),
            full_name: booking.full_name.clone(),
            mobile: booking.mobile.clone(),
            email: booking.email.clone(),
            package_name: booking.package_name.clone(),
            booking_type: booking.booking_type,
            amount: booking.amount,
            current_stage: booking.current_stage,
            status: booking.status,
            order_id: booking.external_order_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ascend_core::validation::placeholder_email;

    use super::*;

    fn booking_details(email: Option<&str>) -> BookingDetails {
        BookingDetails {
            booking_id: "b1".into(),
            full_name: "Asha Rao".into(),
            mobile: "9876543210".into(),
            email: email.map(str::to_string),
            package_name: "Ascend".into(),
            booking_type: BookingType::Investment,
            amount: Some(6499),
            current_stage: CareerStage::EarlyCareer,
            status: BookingStatus::Pending,
            order_id: None,
        }
    }

    #[test]
    fn booking_events_share_the_booking_type_tag() {
        let created = NotificationEvent::BookingCreated(booking_details(None));
        let completed = NotificationEvent::BookingCompleted(booking_details(None));
        assert_eq!(created.notification_type(), NotificationType::Booking);
        assert_eq!(completed.notification_type(), NotificationType::Booking);
        assert_ne!(created.name(), completed.name());
    }

    #[test]
    fn placeholder_email_is_not_a_customer_address() {
        let placeholder = placeholder_email("9876543210");
        let event = NotificationEvent::BookingCreated(booking_details(Some(&placeholder)));
        assert_eq!(event.customer_email(), None);

        let event = NotificationEvent::BookingCreated(booking_details(Some("asha@example.com")));
        assert_eq!(event.customer_email(), Some("asha@example.com"));
    }

    #[test]
    fn metadata_carries_event_name_and_fields() {
        let event = NotificationEvent::BookingCreated(booking_details(None));
        let meta = event.metadata();
        assert_eq!(meta["event"], "booking_created");
        assert_eq!(meta["bookingId"], "b1");
        assert_eq!(meta["bookingType"], "investment");
        assert_eq!(meta["currentStage"], "earlycareer");
        assert_eq!(meta["amount"], 6499);
    }
}
