//! Gateway payment callbacks.

use std::sync::Arc;

use ascend_core::error::CoreError;
use ascend_core::payment::PaymentStatus;
use ascend_core::validation::FieldErrors;
use ascend_db::models::payment::OrderSettlement;
use ascend_db::{DynStore, PaymentStore};
use ascend_events::{NotificationDispatcher, NotificationEvent};
use ascend_gateway::PaymentGateway;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Success callback body, using the gateway's own field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyPaymentInput {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// Failure callback body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentFailedInput {
    pub razorpay_order_id: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub success: bool,
    pub message: String,
}

impl VerificationOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

pub struct PaymentVerifier {
    store: DynStore,
    gateway: Arc<dyn PaymentGateway>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl PaymentVerifier {
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

    /// Check the callback signature and settle the order.
    ///
    /// A mismatch mutates nothing. A repeated callback for an order that is
    /// already settled succeeds without notifying again. An order whose
    /// payment already failed stays failed and is reported as a conflict.
    pub async fn verify_payment(&self, input: VerifyPaymentInput) -> AppResult<VerificationOutcome> {
        let mut errors = FieldErrors::new();
        errors.require("razorpay_order_id", &input.razorpay_order_id);
        errors.require("razorpay_payment_id", &input.razorpay_payment_id);
        errors.require("razorpay_signature", &input.razorpay_signature);
        errors.into_result()?;

        let order_id = input.razorpay_order_id.trim();
        let payment_id = input.razorpay_payment_id.trim();

        if !self
            .gateway
            .verify_signature(order_id, payment_id, &input.razorpay_signature)
        {
            tracing::warn!(order_id, payment_id, "Payment signature mismatch");
            return Err(AppError::VerificationFailed(
                "Invalid payment signature".into(),
            ));
        }

        let settlement = self.store.complete_order(order_id, payment_id).await?;

        if settlement.payment.is_none() && settlement.booking.is_none() {
            tracing::warn!(order_id, payment_id, "Verified payment for unknown order");
            return Ok(VerificationOutcome::ok("Payment verified"));
        }

        if let Some(payment) = &settlement.payment {
            if payment.status == PaymentStatus::Failed {
                tracing::warn!(order_id, payment_id, "Verified callback for a failed payment");
                return Err(CoreError::Conflict(format!(
                    "payment for order {order_id} has already failed"
                ))
                .into());
            }
        }

        if settlement.changed {
            tracing::info!(order_id, payment_id, "Payment completed");
            self.notify_completed(&settlement).await;
        } else {
            tracing::debug!(order_id, "Payment already settled");
        }

        Ok(VerificationOutcome::ok("Payment verified successfully"))
    }

    async fn notify_completed(&self, settlement: &OrderSettlement) {
        let package_name = settlement.booking.as_ref().map(|b| b.package_name.as_str());
        if let Some(payment) = &settlement.payment {
            self.dispatcher
                .dispatch(&NotificationEvent::payment_completed(payment, package_name))
                .await;
        }
        if let Some(booking) = &settlement.booking {
            self.dispatcher
                .dispatch(&NotificationEvent::booking_completed(booking))
                .await;
        }
    }

    /// Record an explicit failure callback. Only `pending` payments move.
    pub async fn mark_failed(&self, input: PaymentFailedInput) -> AppResult<VerificationOutcome> {
        let order_id = input.razorpay_order_id.trim();
        if order_id.is_empty() {
            return Err(CoreError::Validation("razorpay_order_id is required".into()).into());
        }

        let settlement = self.store.fail_order(order_id).await?;
        if settlement.payment.is_none() {
            return Err(CoreError::not_found("Payment order", order_id).into());
        }

        tracing::warn!(
            order_id,
            reason = input.reason.as_deref().unwrap_or("unspecified"),
            changed = settlement.changed,
            "Payment failure reported",
        );
        Ok(VerificationOutcome::ok("Payment failure recorded"))
    }
}
