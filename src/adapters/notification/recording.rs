//! Recording notification sink for tests.
//!
//! Captures every notification for assertions and can be switched into a
//! failing mode to check that delivery errors never affect transitions.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::production::{Notification, NotificationKind};
use crate::ports::NotificationSink;

/// Notification sink that remembers what it was sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    sent: Arc<RwLock<Vec<Notification>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every notification.
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// All notifications accepted so far.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    /// Notifications of one kind.
    pub async fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn clear(&self) {
        self.sent.write().await.clear();
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Notification delivery unavailable",
            ));
        }
        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}
