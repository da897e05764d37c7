//! Notification type tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of an outbound communication, stored on every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Contact,
    Booking,
    Payment,
    ResourceDownload,
}

impl NotificationType {
    pub const ALL: [NotificationType; 4] = [
        NotificationType::Contact,
        NotificationType::Booking,
        NotificationType::Payment,
        NotificationType::ResourceDownload,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::Contact => "contact",
            NotificationType::Booking => "booking",
            NotificationType::Payment => "payment",
            NotificationType::ResourceDownload => "resource_download",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
