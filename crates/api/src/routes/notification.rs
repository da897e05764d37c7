use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /admin        -> list_admin_notifications
/// GET    /stats        -> notification_stats
/// PATCH  /{id}/read    -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(notification::list_admin_notifications))
        .route("/stats", get(notification::notification_stats))
        .route("/{id}/read", patch(notification::mark_read))
}
