//! RecordMeasurementsHandler - Command handler for entering phase quantities.
//!
//! Only the supervisor of the record's sector may enter quantities, and only
//! while the phase is in process or being adjusted. Waste is re-scored by
//! the record itself.

use std::sync::Arc;

use crate::application::authorization::authorize;
use crate::application::handlers::batch::batch_not_found;
use crate::domain::foundation::{
    BatchId, CommandMetadata, DomainError, Permission, PhaseRecordId,
};
use crate::domain::production::{MeasurementUpdate, ProductionPhaseRecord};
use crate::ports::{AccessPolicy, BatchRepository};

const ACTION: &str = "record_measurements";

/// Command to enter quantities on a phase record.
#[derive(Debug, Clone)]
pub struct RecordMeasurementsCommand {
    pub batch_id: BatchId,
    pub record_id: PhaseRecordId,
    pub update: MeasurementUpdate,
    /// Handling waste to add, if any.
    pub movement_waste: Option<f64>,
}

/// Result of successfully recording measurements.
#[derive(Debug, Clone)]
pub struct RecordMeasurementsResult {
    pub record: ProductionPhaseRecord,
    pub batch_version: u64,
}

/// Handler for measurement entry.
pub struct RecordMeasurementsHandler {
    batches: Arc<dyn BatchRepository>,
    access_policy: Arc<dyn AccessPolicy>,
}

impl RecordMeasurementsHandler {
    pub fn new(batches: Arc<dyn BatchRepository>, access_policy: Arc<dyn AccessPolicy>) -> Self {
        Self {
            batches,
            access_policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordMeasurementsCommand,
        metadata: CommandMetadata,
    ) -> Result<RecordMeasurementsResult, DomainError> {
        // 1. Load the batch
        let mut batch = self
            .batches
            .find_by_id(&cmd.batch_id)
            .await?
            .ok_or_else(|| batch_not_found(cmd.batch_id))?;

        // 2. Authorize
        authorize(
            self.access_policy.as_ref(),
            &metadata,
            ACTION,
            Permission::SectorSupervisor,
            batch.record(cmd.record_id)?,
        )
        .await?;

        // 3. Apply
        let expected_version = batch.version();
        batch.record_measurements(cmd.record_id, cmd.update)?;
        if let Some(amount) = cmd.movement_waste {
            batch.add_movement_waste(cmd.record_id, amount)?;
        }

        // 4. Persist
        self.batches.update(&batch, expected_version).await?;

        let record = batch.record(cmd.record_id)?.clone();
        tracing::info!(
            batch_id = %cmd.batch_id,
            record_id = %cmd.record_id,
            phase = %record.phase_kind(),
            product_waste = ?record.product_waste(),
            correlation_id = %metadata.correlation_id(),
            "measurements recorded"
        );

        Ok(RecordMeasurementsResult {
            record,
            batch_version: batch.version(),
        })
    }
}
