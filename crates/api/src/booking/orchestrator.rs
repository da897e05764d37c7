//! Booking creation and admin status changes.

use std::sync::Arc;

use ascend_core::booking::{
    validate_booking, validate_status_transition, BookingFields, BookingStatus, BookingType,
};
use ascend_core::error::CoreError;
use ascend_core::validation::{is_deliverable_email, placeholder_email, FieldErrors};
use ascend_db::models::booking::{Booking, NewBooking};
use ascend_db::models::payment::NewPayment;
use ascend_db::{BookingStore, DynStore, PaymentStore};
use ascend_events::{NotificationDispatcher, NotificationEvent};
use ascend_gateway::{CheckoutOrder, OrderRequest, PaymentGateway};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// Booking form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingInput {
    pub full_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub current_stage: String,
    pub package_id: String,
    pub package_name: String,
    pub booking_type: String,
    pub amount: Option<i64>,
    pub notes: Option<String>,
}

/// Standalone order request (`POST /api/create-razorpay-order`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderInput {
    pub amount: Option<i64>,
    pub package_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub package_name: String,
}

/// What the client should show after submitting a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// Open the gateway checkout with the returned order.
    Checkout,
    /// Show the booking confirmation; nothing to pay.
    Confirmation,
    /// The booking is saved but no order could be raised.
    PaymentUnavailable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcome {
    pub booking: Booking,
    pub booking_type: BookingType,
    pub next_step: NextStep,
    pub checkout: Option<CheckoutOrder>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Runs the booking flow:
/// 1. Validate the submission.
/// 2. Persist the booking (`pending`).
/// 3. For investments, raise a gateway order, record the payment, and attach
///    the order id. A failure at any of these steps leaves the booking in
///    place and the flow continues.
/// 4. Dispatch the `BookingCreated` notification.
pub struct BookingOrchestrator {
    store: DynStore,
    gateway: Arc<dyn PaymentGateway>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl BookingOrchestrator {
    pub fn new(
        store: DynStore,
        gateway: Arc<dyn PaymentGateway>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            store,
            gateway,
            dispatcher,
        }
    }

    pub async fn create_booking(&self, input: CreateBookingInput) -> AppResult<BookingOutcome> {
        let valid = validate_booking(&BookingFields {
            full_name: &input.full_name,
            mobile: &input.mobile,
            email: input.email.as_deref(),
            current_stage: &input.current_stage,
            package_id: &input.package_id,
            package_name: &input.package_name,
            booking_type: &input.booking_type,
            amount: input.amount,
        })?;

        let booking = self
            .store
            .create_booking(NewBooking {
                full_name: valid.full_name,
                mobile: valid.mobile,
                email: valid.email,
                current_stage: valid.current_stage,
                package_id: valid.package_id,
                package_name: valid.package_name,
                booking_type: valid.booking_type,
                amount: valid.amount,
                notes: input.notes.filter(|n| !n.trim().is_empty()),
            })
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            booking_type = %booking.booking_type,
            package_id = %booking.package_id,
            "Booking created",
        );

        let (booking, next_step, checkout) = match booking.booking_type {
            BookingType::DiscoveryCall => (booking, NextStep::Confirmation, None),
            BookingType::Investment => self.open_checkout(booking).await?,
        };

        self.dispatcher
            .dispatch(&NotificationEvent::booking_created(&booking))
            .await;

        Ok(BookingOutcome {
            booking_type: booking.booking_type,
            booking,
            next_step,
            checkout,
        })
    }

    /// Raise the gateway order for an investment booking.
    async fn open_checkout(
        &self,
        booking: Booking,
    ) -> AppResult<(Booking, NextStep, Option<CheckoutOrder>)> {
        let Some(amount) = booking.amount else {
            return Err(AppError::InternalError(format!(
                "investment booking {} has no amount",
                booking.id
            )));
        };

        let customer_email = booking
            .email
            .clone()
            .unwrap_or_else(|| placeholder_email(&booking.mobile));
        let request = OrderRequest {
            amount,
            package_id: booking.package_id.clone(),
            customer_name: booking.full_name.clone(),
            customer_email,
            package_name: booking.package_name.clone(),
        };

        let mut checkout = match self.gateway.create_order(&request).await {
            Ok(checkout) => checkout,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    booking_id = %booking.id,
                    gateway = self.gateway.name(),
                    "Gateway order failed; booking kept without payment",
                );
                return Ok((booking, NextStep::PaymentUnavailable, None));
            }
        };

        let booking = match self.link_order(&request, &booking, &checkout.order_id).await {
            Ok(linked) => linked,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    booking_id = %booking.id,
                    order_id = %checkout.order_id,
                    "Could not record gateway order; booking kept without payment",
                );
                return Ok((booking, NextStep::PaymentUnavailable, None));
            }
        };

        if !is_deliverable_email(&checkout.prefill.email) {
            checkout.prefill.email.clear();
        }
        checkout.prefill.contact = Some(booking.mobile.clone());

        Ok((booking, NextStep::Checkout, Some(checkout)))
    }

    /// Record the pending payment and attach its order id to the booking.
    async fn link_order(
        &self,
        request: &OrderRequest,
        booking: &Booking,
        order_id: &str,
    ) -> AppResult<Booking> {
        self.record_payment(request, order_id).await?;
        let linked = self
            .store
            .attach_booking_order(&booking.id, order_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Booking", booking.id.clone()))?;
        Ok(linked)
    }

    /// Raise a gateway order outside the booking flow.
    ///
    /// The order is recorded as a `pending` payment so its callback can be
    /// verified later.
    pub async fn create_order(&self, input: OrderInput) -> AppResult<CheckoutOrder> {
        let mut errors = FieldErrors::new();
        match input.amount {
            None => errors.add("amount", "is required"),
            Some(a) if a <= 0 => errors.add("amount", "must be positive"),
            Some(_) => {}
        }
        errors.require("packageId", &input.package_id);
        errors.require("customerName", &input.customer_name);
        errors.email("customerEmail", &input.customer_email);
        errors.into_result()?;

        let request = OrderRequest {
            amount: input.amount.unwrap_or_default(),
            package_id: input.package_id.trim().to_string(),
            customer_name: input.customer_name.trim().to_string(),
            customer_email: input.customer_email.trim().to_string(),
            package_name: input.package_name.trim().to_string(),
        };
        let checkout = self.gateway.create_order(&request).await?;
        self.record_payment(&request, &checkout.order_id).await?;
        Ok(checkout)
    }

    async fn record_payment(&self, request: &OrderRequest, order_id: &str) -> AppResult<()> {
        let payment = self
            .store
            .create_payment(NewPayment {
                package_id: request.package_id.clone(),
                customer_email: request.customer_email.clone(),
                customer_name: request.customer_name.clone(),
                amount: request.amount,
                external_order_id: order_id.to_string(),
            })
            .await?;
        tracing::debug!(payment_id = %payment.id, order_id, "Payment recorded");
        Ok(())
    }

    /// Admin status change.
    ///
    /// Re-applying the current status succeeds and advances `updatedAt`.
    /// Leaving `completed` or `cancelled` is a conflict.
    pub async fn update_status(&self, id: &str, status: &str) -> AppResult<Booking> {
        let next: BookingStatus = status.parse()?;

        let current = self
            .store
            .find_booking(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Booking", id))?;
        validate_status_transition(current.status, next)?;

        let updated = self
            .store
            .update_booking_status(id, next)
            .await?
            .ok_or_else(|| CoreError::not_found("Booking", id))?;

        tracing::info!(
            booking_id = %id,
            from = %current.status,
            to = %next,
            "Booking status updated",
        );
        Ok(updated)
    }
}
