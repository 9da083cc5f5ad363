//! Push payload contract and notification display values.

use serde::Deserialize;
use worker_core::NotificationDefaults;

/// Incoming push payload. Every field is optional; absent fields fall back
/// to the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PushPayload {
    /// Notification title.
    #[serde(default)]
    pub title: Option<String>,
    /// Notification body.
    #[serde(default)]
    pub body: Option<String>,
    /// Notification tag (replaces an earlier notification with the same tag).
    #[serde(default)]
    pub tag: Option<String>,
}

impl PushPayload {
    /// Parse a raw push body as JSON.
    pub fn parse(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Resolve the payload into a displayable notification.
    pub fn into_notification(self, defaults: &NotificationDefaults) -> Notification {
        Notification {
            title: self.title.unwrap_or_else(|| defaults.title.clone()),
            body: self.body.unwrap_or_else(|| defaults.body.clone()),
            tag: self.tag.unwrap_or_else(|| defaults.tag.clone()),
            icon: defaults.icon.clone(),
            badge: defaults.badge.clone(),
            require_interaction: false,
            silent: false,
        }
    }
}

/// A system notification ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Tag for replacement and later dismissal.
    pub tag: String,
    /// Icon path.
    pub icon: String,
    /// Badge icon path.
    pub badge: String,
    /// Whether the notification stays until the user interacts with it.
    pub require_interaction: bool,
    /// Whether the notification is delivered without sound or vibration.
    pub silent: bool,
}
