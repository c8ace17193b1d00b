//! Notification adapters
//!
//! - `RecordingNotificationSink` - captures notifications for assertions
//! - `TracingNotificationSink` - logs notifications

mod recording;
mod tracing_sink;

pub use recording::RecordingNotificationSink;
pub use tracing_sink::TracingNotificationSink;
