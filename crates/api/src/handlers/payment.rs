//! Handlers for gateway orders and payment callbacks.

use ascend_db::models::payment::Payment;
use ascend_db::PaymentStore;
use ascend_gateway::CheckoutOrder;
use axum::extract::State;
use axum::Json;

use crate::booking::{OrderInput, PaymentFailedInput, VerificationOutcome, VerifyPaymentInput};
use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/create-razorpay-order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<OrderInput>,
) -> AppResult<Json<CheckoutOrder>> {
    Ok(Json(state.bookings.create_order(input).await?))
}

/// POST /api/verify-payment
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(input): Json<VerifyPaymentInput>,
) -> AppResult<Json<VerificationOutcome>> {
    Ok(Json(state.payments.verify_payment(input).await?))
}

/// POST /api/payment-failed
pub async fn payment_failed(
    State(state): State<AppState>,
    Json(input): Json<PaymentFailedInput>,
) -> AppResult<Json<VerificationOutcome>> {
    Ok(Json(state.payments.mark_failed(input).await?))
}

/// GET /api/payments
pub async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Vec<Payment>>> {
    Ok(Json(state.store.list_payments().await?))
}
