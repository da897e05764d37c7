pub mod booking;
pub mod contact;
pub mod content;
pub mod health;
pub mod notification;
pub mod package;
pub mod payment;
pub mod sms;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /packages                         list
/// /packages/{id}                    get
///
/// /bookings                         create, list
/// /bookings/{id}                    get
/// /bookings/{id}/status             update status (PATCH)
///
/// /create-razorpay-order            raise a gateway order (POST)
/// /verify-payment                   success callback (POST)
/// /payment-failed                   failure callback (POST)
/// /payments                         list
///
/// /contact                          submit, list
///
/// /notifications/admin              admin inbox
/// /notifications/stats              counters
/// /notifications/{id}/read          mark read (PATCH)
///
/// /send-sms                         single SMS (POST)
/// /send-bulk-sms                    bulk SMS (POST)
///
/// /resources                        list
/// /resources/{id}                   get
/// /resources/{id}/download          lead capture (POST)
/// /blog-posts                       list, create
/// /blog-posts/{id}                  get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/packages", package::router())
        .nest("/bookings", booking::router())
        .merge(payment::router())
        .nest("/contact", contact::router())
        .nest("/notifications", notification::router())
        .merge(sms::router())
        .merge(content::router())
}
