//! Batch command and query handlers.

// Command handlers
mod create_batch;

// Query handlers
mod get_batch;

pub use create_batch::{CreateBatchCommand, CreateBatchHandler, CreateBatchResult};
pub use get_batch::{GetBatchHandler, GetBatchQuery};

pub(crate) use get_batch::batch_not_found;
