use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Payment routes. Paths keep the public site's existing URLs.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-razorpay-order", post(payment::create_order))
        .route("/verify-payment", post(payment::verify_payment))
        .route("/payment-failed", post(payment::payment_failed))
        .route("/payments", get(payment::list_payments))
}
