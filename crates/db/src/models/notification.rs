//! Notification inbox models.

use std::collections::BTreeMap;

use ascend_core::notification::NotificationType;
use ascend_core::types::{EntityId, Timestamp};
use serde::Serialize;

/// A persisted record of one outbound message to one recipient.
///
/// Exists whether or not external delivery succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub recipient: String,
    pub subject: String,
    pub text_content: String,
    pub html_content: String,
    pub metadata: serde_json::Value,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for persisting a rendered notification. Starts unread.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub notification_type: NotificationType,
    pub recipient: String,
    pub subject: String,
    pub text_content: String,
    pub html_content: String,
    pub metadata: serde_json::Value,
}

/// Inbox counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    pub total: usize,
    pub unread: usize,
    /// Count per type tag; every known type is present, zero included.
    pub by_type: BTreeMap<&'static str, usize>,
}

impl NotificationStats {
    pub fn from_notifications(notifications: &[Notification]) -> Self {
        let mut by_type: BTreeMap<&'static str, usize> = NotificationType::ALL
            .iter()
            .map(|t| (t.as_str(), 0))
            .collect();
        for n in notifications {
            *by_type.entry(n.notification_type.as_str()).or_default() += 1;
        }
        Self {
            total: notifications.len(),
            unread: notifications.iter().filter(|n| !n.is_read).count(),
            by_type,
        }
    }
}
