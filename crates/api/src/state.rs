use std::sync::Arc;

use ascend_db::DynStore;
use ascend_events::{NotificationDispatcher, SmsChannel};
use ascend_gateway::PaymentGateway;

use crate::booking::{BookingOrchestrator, PaymentVerifier};
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Entity store.
    pub store: DynStore,
    /// Payment provider used for order creation.
    pub gateway: Arc<dyn PaymentGateway>,
    /// Notification fan-out.
    pub dispatcher: Arc<NotificationDispatcher>,
    /// Booking creation and admin status changes.
    pub bookings: Arc<BookingOrchestrator>,
    /// Payment callback handling.
    pub payments: Arc<PaymentVerifier>,
    /// Direct SMS channel, when configured.
    pub sms: Option<Arc<dyn SmsChannel>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the booking services on top of the shared collaborators.
    pub fn new(
        store: DynStore,
        gateway: Arc<dyn PaymentGateway>,
        dispatcher: Arc<NotificationDispatcher>,
        sms: Option<Arc<dyn SmsChannel>>,
        config: ServerConfig,
    ) -> Self {
        let bookings = Arc::new(BookingOrchestrator::new(
            store.clone(),
            gateway.clone(),
            dispatcher.clone(),
        ));
        let payments = Arc::new(PaymentVerifier::new(
            store.clone(),
            gateway.clone(),
            dispatcher.clone(),
        ));
        Self {
            store,
            gateway,
            dispatcher,
            bookings,
            payments,
            sms,
            config: Arc::new(config),
        }
    }
}
