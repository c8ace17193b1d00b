//! NotificationSink port - delivery of workflow notifications.
//!
//! Delivery is fire-and-forget from the workflow's point of view: handlers
//! call the sink after the transition is persisted, log any error and carry
//! on. A failing sink never undoes or fails a transition.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::production::Notification;

/// Port for delivering notifications to sectors and roles.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    async fn notify(&self, notification: &Notification) -> Result<(), DomainError>;
}
