//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - In-memory repositories
//! - `notification` - Notification sinks (recording, tracing)
//! - `access` - Access policy implementations

pub mod access;
pub mod notification;
pub mod storage;

pub use access::StaticAccessPolicy;
pub use notification::{RecordingNotificationSink, TracingNotificationSink};
pub use storage::{InMemoryBatchRepository, InMemoryProductRepository, InMemoryWorkWeekRepository};
