//! Dispatcher behaviour with recording and failing channels.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ascend_core::booking::{BookingType, CareerStage};
use ascend_core::notification::NotificationType;
use ascend_core::validation::placeholder_email;
use ascend_db::models::booking::NewBooking;
use ascend_db::{BookingStore, DynStore, MemoryStore, NotificationStore};
use ascend_events::{
    DispatcherConfig, EmailChannel, EmailError, NotificationDispatcher, NotificationEvent,
    OutboundEmail, SmsChannel, SmsError, SmsReceipt,
};
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Channel doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingEmail {
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl EmailChannel for RecordingEmail {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FailingEmail {
    attempts: AtomicUsize,
}

#[async_trait]
impl EmailChannel for FailingEmail {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _email: &OutboundEmail) -> Result<(), EmailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(EmailError::Build("provider down".into()))
    }
}

#[derive(Default)]
struct FailingSms {
    attempts: Mutex<Vec<String>>,
}

#[async_trait]
impl SmsChannel for FailingSms {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, to: &str, _body: &str) -> Result<SmsReceipt, SmsError> {
        self.attempts.lock().unwrap().push(to.to_string());
        Err(SmsError::Api {
            status: 503,
            body: "unavailable".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config() -> DispatcherConfig {
    DispatcherConfig {
        admin_email: "admin@ascendcoaching.in".into(),
        admin_phone: Some("9000000001".into()),
    }
}

async fn booking_event(store: &DynStore, email: Option<String>) -> NotificationEvent {
    let booking = store
        .create_booking(NewBooking {
            full_name: "Asha Rao".into(),
            mobile: "9876543210".into(),
            email,
            current_stage: CareerStage::EarlyCareer,
            package_id: "ascend-professional".into(),
            package_name: "Ascend".into(),
            booking_type: BookingType::Investment,
            amount: Some(6499),
            notes: None,
        })
        .await
        .unwrap();
    NotificationEvent::booking_created(&booking)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_and_customer_each_get_one_record() {
    let store: DynStore = Arc::new(MemoryStore::new());
    let email = Arc::new(RecordingEmail::default());
    let dispatcher =
        NotificationDispatcher::new(store.clone(), config()).with_email(email.clone());

    let event = booking_event(&store, Some("asha@example.com".into())).await;
    let stored = dispatcher.dispatch(&event).await;

    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].recipient, "admin@ascendcoaching.in");
    assert_eq!(stored[1].recipient, "asha@example.com");
    assert!(stored.iter().all(|n| n.notification_type == NotificationType::Booking));
    assert!(stored.iter().all(|n| !n.is_read));

    let sent = email.sent.lock().unwrap();
    let recipients: Vec<_> = sent.iter().map(|e| e.to.as_str()).collect();
    assert_eq!(recipients, ["admin@ascendcoaching.in", "asha@example.com"]);
}

#[tokio::test]
async fn placeholder_email_skips_customer() {
    let store: DynStore = Arc::new(MemoryStore::new());
    let dispatcher = NotificationDispatcher::new(store.clone(), config());

    let event = booking_event(&store, Some(placeholder_email("9876543210"))).await;
    let stored = dispatcher.dispatch(&event).await;

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].recipient, "admin@ascendcoaching.in");
}

#[tokio::test]
async fn failing_channels_still_store_every_notification() {
    let store: DynStore = Arc::new(MemoryStore::new());
    let email = Arc::new(FailingEmail::default());
    let sms = Arc::new(FailingSms::default());
    let dispatcher = NotificationDispatcher::new(store.clone(), config())
        .with_email(email.clone())
        .with_sms(sms.clone());

    let event = booking_event(&store, Some("asha@example.com".into())).await;
    let stored = dispatcher.dispatch(&event).await;

    assert_eq!(stored.len(), 2);
    assert_eq!(store.list_notifications().await.unwrap().len(), 2);

    // One attempt per recipient per channel.
    assert_eq!(email.attempts.load(Ordering::SeqCst), 2);
    let sms_targets = sms.attempts.lock().unwrap().clone();
    assert_eq!(sms_targets, ["9000000001", "9876543210"]);
}

#[tokio::test]
async fn admin_sms_needs_forwarding_number() {
    let store: DynStore = Arc::new(MemoryStore::new());
    let sms = Arc::new(FailingSms::default());
    let dispatcher = NotificationDispatcher::new(
        store.clone(),
        DispatcherConfig {
            admin_email: "admin@ascendcoaching.in".into(),
            admin_phone: None,
        },
    )
    .with_sms(sms.clone());

    let event = booking_event(&store, None).await;
    dispatcher.dispatch(&event).await;

    assert!(sms.attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stored_notification_carries_rendered_content_and_metadata() {
    let store: DynStore = Arc::new(MemoryStore::new());
    let dispatcher = NotificationDispatcher::new(store.clone(), config());

    let event = booking_event(&store, None).await;
    let stored = dispatcher.dispatch(&event).await;
    let admin = &stored[0];

    assert!(admin.subject.contains("Asha Rao"));
    assert!(admin.text_content.contains("₹6,499"));
    assert!(admin.html_content.starts_with("<div"));
    assert_eq!(admin.metadata["event"], "booking_created");
    assert_eq!(admin.metadata["mobile"], "9876543210");

    let inbox = store
        .list_notifications_for("admin@ascendcoaching.in")
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, admin.id);
}
