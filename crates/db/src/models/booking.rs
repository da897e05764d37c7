//! Booking models.

use ascend_core::booking::{BookingStatus, BookingType, CareerStage};
use ascend_core::payment::PaymentStatus;
use ascend_core::types::{EntityId, Timestamp};
use serde::Serialize;

/// A customer's request for a discovery call or a paid program.
///
/// `amount` and `payment_status` are set iff `booking_type` is
/// [`BookingType::Investment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: EntityId,
    pub full_name: String,
    /// Ten normalised digits.
    pub mobile: String,
    pub email: Option<String>,
    pub current_stage: CareerStage,
    pub package_id: EntityId,
    /// Snapshot of the package name at booking time.
    pub package_name: String,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub amount: Option<i64>,
    pub payment_status: Option<PaymentStatus>,
    pub external_order_id: Option<String>,
    pub external_payment_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a booking from an already validated submission.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub full_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub current_stage: CareerStage,
    pub package_id: EntityId,
    pub package_name: String,
    pub booking_type: BookingType,
    pub amount: Option<i64>,
    pub notes: Option<String>,
}
