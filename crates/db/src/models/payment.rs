//! Payment models.

use ascend_core::payment::PaymentStatus;
use ascend_core::types::{EntityId, Timestamp};
use serde::Serialize;

use super::booking::Booking;

/// A gateway order raised for a package purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: EntityId,
    pub package_id: EntityId,
    pub customer_email: String,
    pub customer_name: String,
    /// Whole currency units.
    pub amount: i64,
    /// The gateway's order id; joins back to [`Booking::external_order_id`].
    pub external_order_id: String,
    pub external_payment_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a freshly created gateway order. Status starts `pending`.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub package_id: EntityId,
    pub customer_email: String,
    pub customer_name: String,
    pub amount: i64,
    pub external_order_id: String,
}

/// Outcome of settling a gateway order (verified or failed).
#[derive(Debug, Clone, Default)]
pub struct OrderSettlement {
    /// The payment for the order, after the update.
    pub payment: Option<Payment>,
    /// The booking joined by order id, after the update.
    pub booking: Option<Booking>,
    /// `false` when the order was already in the requested state, so
    /// nothing was written.
    pub changed: bool,
}
