//! Handlers for the admin notification inbox.

use ascend_core::error::CoreError;
use ascend_db::models::notification::{Notification, NotificationStats};
use ascend_db::NotificationStore;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/notifications/admin
///
/// Everything addressed to the admin inbox, newest first.
pub async fn list_admin_notifications(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Notification>>> {
    let admin = &state.dispatcher.config().admin_email;
    Ok(Json(state.store.list_notifications_for(admin).await?))
}

/// GET /api/notifications/stats
pub async fn notification_stats(
    State(state): State<AppState>,
) -> AppResult<Json<NotificationStats>> {
    let all = state.store.list_notifications().await?;
    Ok(Json(NotificationStats::from_notifications(&all)))
}

/// PATCH /api/notifications/{id}/read
///
/// Idempotent: marking an already-read notification returns it unchanged.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let notification = state
        .store
        .mark_notification_read(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Notification", id))?;
    Ok(Json(notification))
}
