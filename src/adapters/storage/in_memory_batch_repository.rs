//! In-Memory Batch Repository
//!
//! Keeps whole Batch aggregates in a map. `update` checks and writes the
//! version under one write lock, so two racing transitions on the same batch
//! cannot both land.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{BatchId, BatchStatus, DomainError, ErrorCode, ProductId};
use crate::domain::production::Batch;
use crate::ports::BatchRepository;

/// In-memory batch storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryBatchRepository {
    batches: Arc<RwLock<HashMap<BatchId, Batch>>>,
}

impl InMemoryBatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored batches (useful for tests)
    pub async fn count(&self) -> usize {
        self.batches.read().await.len()
    }

    /// Clear all stored batches (useful for tests)
    pub async fn clear(&self) {
        self.batches.write().await.clear();
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn save(&self, batch: &Batch) -> Result<(), DomainError> {
        let mut batches = self.batches.write().await;
        if batches.contains_key(&batch.id()) {
            return Err(DomainError::new(ErrorCode::AlreadyExists, "Batch already exists")
                .with_detail("batch_id", batch.id().to_string()));
        }
        batches.insert(batch.id(), batch.clone());
        Ok(())
    }

    async fn update(&self, batch: &Batch, expected_version: u64) -> Result<(), DomainError> {
        let mut batches = self.batches.write().await;
        let stored = batches.get(&batch.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::BatchNotFound, "Batch not found")
                .with_detail("batch_id", batch.id().to_string())
        })?;
        if stored.version() != expected_version {
            return Err(DomainError::conflict(expected_version, stored.version()));
        }
        batches.insert(batch.id(), batch.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BatchId) -> Result<Option<Batch>, DomainError> {
        Ok(self.batches.read().await.get(id).cloned())
    }

    async fn find_by_product(&self, product_id: &ProductId) -> Result<Vec<Batch>, DomainError> {
        let batches = self.batches.read().await;
        let mut found: Vec<Batch> = batches
            .values()
            .filter(|b| b.product_id() == *product_id)
            .cloned()
            .collect();
        found.sort_by_key(|b| b.started_at());
        Ok(found)
    }

    async fn find_by_status(&self, status: BatchStatus) -> Result<Vec<Batch>, DomainError> {
        let batches = self.batches.read().await;
        let mut found: Vec<Batch> = batches
            .values()
            .filter(|b| b.status() == status)
            .cloned()
            .collect();
        found.sort_by_key(|b| b.started_at());
        Ok(found)
    }
}
