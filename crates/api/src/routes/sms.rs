use axum::routing::post;
use axum::Router;

use crate::handlers::sms;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-sms", post(sms::send_sms))
        .route("/send-bulk-sms", post(sms::send_bulk_sms))
}
