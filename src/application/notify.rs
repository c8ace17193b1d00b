//! Fire-and-forget delivery of workflow notifications.

use crate::domain::production::Notification;
use crate::ports::NotificationSink;

/// Sends every notification, logging failures instead of returning them.
///
/// Returns how many were delivered.
pub(crate) async fn dispatch(
    sink: &dyn NotificationSink,
    notifications: &[Notification],
    correlation_id: &str,
) -> usize {
    let mut delivered = 0;
    for notification in notifications {
        match sink.notify(notification).await {
            Ok(()) => delivered += 1,
            Err(err) => tracing::warn!(
                error = %err,
                kind = %notification.kind,
                target_recipient = %notification.target,
                record_id = %notification.record_id,
                correlation_id,
                "notification delivery failed"
            ),
        }
    }
    delivered
}
