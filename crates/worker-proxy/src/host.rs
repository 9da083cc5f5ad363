//! Host runtime and notification display seams.

use async_trait::async_trait;

use crate::push::Notification;

/// Errors from notification display.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The host refused or failed to display the notification.
    #[error("notification display failed: {0}")]
    Display(String),
}

/// Client-context control surface of the embedding runtime.
#[async_trait]
pub trait HostRuntime: Send + Sync {
    /// Make this proxy instance active-eligible immediately instead of
    /// waiting for a predecessor to finish serving existing clients.
    async fn skip_waiting(&self);

    /// Claim all open client contexts so already-open pages are served by
    /// this instance without a reload.
    async fn claim_clients(&self);

    /// Focus an existing client on `url`, or open a new one.
    async fn focus_or_open(&self, url: &str);
}

/// System notification surface of the embedding runtime.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Display a notification.
    async fn show(&self, notification: Notification) -> Result<(), NotifyError>;

    /// Close a displayed notification by tag.
    async fn close(&self, tag: &str);
}
