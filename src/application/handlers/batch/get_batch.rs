//! GetBatchHandler - Query handler for retrieving a batch.

use std::sync::Arc;

use crate::domain::foundation::{BatchId, DomainError, ErrorCode};
use crate::domain::production::Batch;
use crate::ports::BatchRepository;

/// Query to get a batch by ID.
#[derive(Debug, Clone)]
pub struct GetBatchQuery {
    pub batch_id: BatchId,
}

/// Handler for retrieving batches with their phase records.
pub struct GetBatchHandler {
    batches: Arc<dyn BatchRepository>,
}

impl GetBatchHandler {
    pub fn new(batches: Arc<dyn BatchRepository>) -> Self {
        Self { batches }
    }

    pub async fn handle(&self, query: GetBatchQuery) -> Result<Batch, DomainError> {
        self.batches
            .find_by_id(&query.batch_id)
            .await?
            .ok_or_else(|| batch_not_found(query.batch_id))
    }
}

pub(crate) fn batch_not_found(batch_id: BatchId) -> DomainError {
    DomainError::new(ErrorCode::BatchNotFound, "Batch not found")
        .with_detail("batch_id", batch_id.to_string())
}
