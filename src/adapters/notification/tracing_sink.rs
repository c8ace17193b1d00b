//! Notification sink that writes each notification to the log.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::production::Notification;
use crate::ports::NotificationSink;

/// Logs notifications at `info` level. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl TracingNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        tracing::info!(
            target_recipient = %notification.target,
            kind = %notification.kind,
            batch_id = %notification.batch_id,
            record_id = %notification.record_id,
            "notification"
        );
        Ok(())
    }
}
