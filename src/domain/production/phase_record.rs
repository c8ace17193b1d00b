//! ProductionPhaseRecord - the work-in-progress unit for one phase of a batch.
//!
//! A record tracks declared vs. standard quantities, re-scores its waste on
//! every change, and knows how to check that its output chains into the
//! next phase's input.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ensure_non_negative, same_quantity, BatchId, DomainError, ErrorCode, PhaseKind, PhaseRecordId,
    PhaseStatus, SectorId, Timestamp, UnitOfMeasure,
};

use super::recipe::PhasePlan;
use super::waste::{compute_product_waste, total_waste, WasteMeasurements};

/// Quantities entered by an operator. `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementUpdate {
    pub input: Option<f64>,
    pub output: Option<f64>,
    pub standard_input: Option<f64>,
    pub standard_output: Option<f64>,
    pub output_unit: Option<UnitOfMeasure>,
}

impl MeasurementUpdate {
    /// Declared input and output only.
    pub fn declared(input: f64, output: f64) -> Self {
        Self {
            input: Some(input),
            output: Some(output),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("input", self.input),
            ("output", self.output),
            ("standard_input", self.standard_input),
            ("standard_output", self.standard_output),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                ensure_non_negative(name, v)?;
            }
        }
        Ok(())
    }
}

/// One phase of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPhaseRecord {
    id: PhaseRecordId,
    batch_id: BatchId,
    sector_id: Option<SectorId>,
    phase_kind: PhaseKind,
    phase_order: Option<u8>,
    status: PhaseStatus,
    input: Option<f64>,
    standard_input: Option<f64>,
    output: Option<f64>,
    standard_output: Option<f64>,
    output_unit: Option<UnitOfMeasure>,
    product_waste: Option<f64>,
    movement_waste: Option<f64>,
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
    updated_at: Timestamp,
}

impl ProductionPhaseRecord {
    /// Creates a pending record for a phase of a batch.
    pub fn new(batch_id: BatchId, phase_kind: PhaseKind) -> Self {
        let mut record = Self {
            id: PhaseRecordId::new(),
            batch_id,
            sector_id: None,
            phase_kind,
            phase_order: None,
            status: PhaseStatus::Pendiente,
            input: None,
            standard_input: None,
            output: None,
            standard_output: None,
            output_unit: None,
            product_waste: None,
            movement_waste: None,
            start_date: None,
            end_date: None,
            updated_at: Timestamp::now(),
        };
        record.touch();
        record
    }

    /// Creates a pending record seeded with the recipe's standards and sector.
    pub fn from_plan(batch_id: BatchId, plan: &PhasePlan) -> Self {
        let mut record = Self::new(batch_id, plan.kind);
        record.sector_id = plan.sector_id;
        record.standard_input = plan.standard_input;
        record.standard_output = plan.standard_output;
        record.output_unit = plan.output_unit;
        record.touch();
        record
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> PhaseRecordId {
        self.id
    }

    pub fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    pub fn sector_id(&self) -> Option<SectorId> {
        self.sector_id
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase_kind
    }

    /// Catalog order of the phase; `None` only on records loaded from legacy data.
    pub fn phase_order(&self) -> Option<u8> {
        self.phase_order
    }

    pub fn status(&self) -> PhaseStatus {
        self.status
    }

    pub fn input(&self) -> Option<f64> {
        self.input
    }

    pub fn standard_input(&self) -> Option<f64> {
        self.standard_input
    }

    pub fn output(&self) -> Option<f64> {
        self.output
    }

    pub fn standard_output(&self) -> Option<f64> {
        self.standard_output
    }

    pub fn output_unit(&self) -> Option<UnitOfMeasure> {
        self.output_unit
    }

    pub fn product_waste(&self) -> Option<f64> {
        self.product_waste
    }

    pub fn movement_waste(&self) -> Option<f64> {
        self.movement_waste
    }

    pub fn start_date(&self) -> Option<NaiveDateTime> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.end_date
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Dashboard-level waste for a settled phase.
    pub fn total_waste(&self) -> Option<f64> {
        total_waste(
            self.status,
            self.product_waste,
            self.output,
            self.movement_waste,
        )
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Enters measured or standard quantities and re-scores waste.
    pub fn record_measurements(&mut self, update: MeasurementUpdate) -> Result<(), DomainError> {
        if !self.status.accepts_measurements() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Measurements cannot be recorded while {} is {}",
                    self.phase_kind, self.status
                ),
            )
            .with_detail("status", format!("{:?}", self.status)));
        }
        update.validate()?;

        if let Some(v) = update.input {
            self.input = Some(v);
        }
        if let Some(v) = update.output {
            self.output = Some(v);
        }
        if let Some(v) = update.standard_input {
            self.standard_input = Some(v);
        }
        if let Some(v) = update.standard_output {
            self.standard_output = Some(v);
        }
        if let Some(unit) = update.output_unit {
            self.output_unit = Some(unit);
        }
        self.touch();
        Ok(())
    }

    /// Adds material lost while moving product between phases.
    pub fn add_movement_waste(&mut self, amount: f64) -> Result<(), DomainError> {
        let amount = ensure_non_negative("movement_waste", amount)?;
        self.movement_waste = Some(self.movement_waste.unwrap_or(0.0) + amount);
        self.touch();
        Ok(())
    }

    /// Checks the record carries what a reviewer needs.
    pub fn ensure_ready_for_review(&self) -> Result<(), DomainError> {
        match (self.input, self.output) {
            (Some(input), Some(output)) => {
                ensure_non_negative("input", input)?;
                ensure_non_negative("output", output)?;
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::MissingMeasurements,
                format!("{} needs input and output before review", self.phase_kind),
            )
            .with_detail("phase", self.phase_kind.display_name())),
        }
    }

    /// Checks this record's output feeds `next` consistently.
    ///
    /// Passes when this record has no standard output or unit yet, or when
    /// there is no next phase. A next phase whose own standard input or unit
    /// is still unset has nothing to compare against and also passes.
    pub fn validate_chaining(&self, next: Option<&ProductionPhaseRecord>) -> Result<(), DomainError> {
        let (standard_output, unit) = match (self.standard_output, self.output_unit) {
            (Some(so), Some(unit)) => (so, unit),
            _ => return Ok(()),
        };
        let Some(next) = next else {
            return Ok(());
        };

        let quantity_mismatch = next
            .standard_input
            .is_some_and(|si| !same_quantity(si, standard_output));
        let unit_mismatch = next.output_unit.is_some_and(|u| u != unit);

        if quantity_mismatch || unit_mismatch {
            return Err(DomainError::new(
                ErrorCode::ChainMismatch,
                format!(
                    "{} output ({} {}) does not chain into {}",
                    self.phase_kind, standard_output, unit, next.phase_kind
                ),
            )
            .with_detail("phase", self.phase_kind.display_name())
            .with_detail("next_phase", next.phase_kind.display_name())
            .with_detail("standard_output", standard_output.to_string())
            .with_detail(
                "next_standard_input",
                next.standard_input
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ));
        }
        Ok(())
    }

    /// Moves the record to `status`, stamping start/end dates.
    pub(crate) fn set_status(&mut self, status: PhaseStatus, at: NaiveDateTime) {
        match status {
            PhaseStatus::EnProceso => self.start_date = Some(at),
            PhaseStatus::Completada | PhaseStatus::Rechazada => self.end_date = Some(at),
            _ => {}
        }
        self.status = status;
        self.touch();
    }

    /// Re-derives computed fields; runs on every create and update.
    fn touch(&mut self) {
        self.phase_order = Some(self.phase_kind.order());
        self.product_waste = compute_product_waste(&WasteMeasurements {
            input: self.input,
            output: self.output,
            standard_input: self.standard_input,
            standard_output: self.standard_output,
        });
        self.updated_at = Timestamp::now();
    }
}
