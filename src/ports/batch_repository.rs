//! Batch repository port (write side).
//!
//! Defines the contract for persisting and retrieving Batch aggregates
//! together with their phase records.
//!
//! # Concurrency
//!
//! `update` is a compare-and-swap on the batch version: it must only land if
//! the stored batch is still at `expected_version`. The whole aggregate,
//! records included, is written in that one step, which is what makes a
//! rejection cascade atomic.

use async_trait::async_trait;

use crate::domain::foundation::{BatchId, BatchStatus, DomainError, ProductId};
use crate::domain::production::Batch;

/// Repository port for Batch aggregate persistence.
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// Save a new batch.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if a batch with the same id exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, batch: &Batch) -> Result<(), DomainError>;

    /// Replace a stored batch, provided nobody changed it in between.
    ///
    /// # Errors
    ///
    /// - `BatchNotFound` if the batch doesn't exist
    /// - `ConcurrentModification` if the stored version is not `expected_version`
    /// - `DatabaseError` on persistence failure
    async fn update(&self, batch: &Batch, expected_version: u64) -> Result<(), DomainError>;

    /// Find a batch by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &BatchId) -> Result<Option<Batch>, DomainError>;

    /// Find all batches of a product.
    async fn find_by_product(&self, product_id: &ProductId) -> Result<Vec<Batch>, DomainError>;

    /// Find all batches in a status.
    async fn find_by_status(&self, status: BatchStatus) -> Result<Vec<Batch>, DomainError>;
}
