//! User-facing notifications.
//!
//! The controller hands each [`Notification`] to a [`NotificationSink`] and
//! moves on. [`NotificationBus`] is the default sink: a
//! [`tokio::sync::broadcast`] channel so any number of front ends can listen.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::OperationError;
use crate::models::SaveResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Error,
    Success,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: Variant,
}

impl Notification {
    pub fn failure(err: &OperationError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.message().to_string(),
            variant: Variant::Error,
        }
    }

    pub fn saved(result: &SaveResult) -> Self {
        Self {
            title: "Saved".to_string(),
            message: format!(
                "Search {}. Properties: +{} / ~{}. Mortgages: {}.",
                result.search_id,
                result.properties_inserted,
                result.properties_updated,
                result.mortgages_upserted
            ),
            variant: Variant::Success,
        }
    }
}

/// Fire-and-forget receiver of notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Broadcasts notifications to every current subscriber.
#[derive(Debug)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Receiver for all future notifications (past ones are not replayed).
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(16)
    }
}

impl NotificationSink for NotificationBus {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Error => warn!("{}: {}", notification.title, notification.message),
            Variant::Success => info!("{}: {}", notification.title, notification.message),
        }
        // No subscribers is fine.
        let _ = self.tx.send(notification);
    }
}
