//! Batch aggregate - The root entity for one production run.
//!
//! A Batch exclusively owns its phase records. Every status change goes
//! through `plan_transition`, which computes the complete set of mutations
//! (the record itself, any cascaded siblings, the batch status and the
//! notifications to send) without touching the aggregate, and
//! `apply_plan`, which commits that set in one step and bumps the version
//! used for optimistic concurrency.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BatchId, BatchStatus, DomainError, ErrorCode, PhaseRecordId, PhaseStatus, ProductId, Role,
    StateMachine, Timestamp,
};

use super::{
    MeasurementUpdate, Notification, NotificationKind, NotificationTarget, PhaseAction,
    PhaseWorkflow, ProductRecipe, ProductionPhaseRecord,
};

/// Everything a single transition changes, computed ahead of time.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub batch_id: BatchId,
    pub record_id: PhaseRecordId,
    pub action: PhaseAction,
    pub from: PhaseStatus,
    pub to: PhaseStatus,
    /// The transitioned record first, then any cascaded siblings.
    pub records: Vec<ProductionPhaseRecord>,
    pub batch_status: Option<BatchStatus>,
    pub notifications: Vec<Notification>,
    /// Batch version the plan was computed against.
    pub base_version: u64,
}

impl TransitionPlan {
    /// Number of sibling records changed alongside the target record.
    pub fn cascaded(&self) -> usize {
        self.records.len().saturating_sub(1)
    }
}

/// The Batch aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    id: BatchId,
    product_id: ProductId,
    is_alcoholic: bool,
    status: BatchStatus,
    records: Vec<ProductionPhaseRecord>,
    started_at: NaiveDateTime,
    estimated_completion: Option<NaiveDateTime>,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Batch {
    /// Creates a batch with one pending record per applicable recipe phase.
    pub fn create(
        recipe: &ProductRecipe,
        started_at: NaiveDateTime,
        estimated_completion: Option<NaiveDateTime>,
    ) -> Self {
        let id = BatchId::new();
        let now = Timestamp::now();
        let records = recipe
            .applicable_plans()
            .iter()
            .map(|plan| ProductionPhaseRecord::from_plan(id, plan))
            .collect();

        Self {
            id,
            product_id: recipe.id,
            is_alcoholic: recipe.is_alcoholic,
            status: BatchStatus::EnProduccion,
            records,
            started_at,
            estimated_completion,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a batch from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BatchId,
        product_id: ProductId,
        is_alcoholic: bool,
        status: BatchStatus,
        records: Vec<ProductionPhaseRecord>,
        started_at: NaiveDateTime,
        estimated_completion: Option<NaiveDateTime>,
        version: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            product_id,
            is_alcoholic,
            status,
            records,
            started_at,
            estimated_completion,
            version,
            created_at,
            updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> BatchId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn is_alcoholic(&self) -> bool {
        self.is_alcoholic
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    /// Records in storage order. Use `ordered_records` for phase order.
    pub fn records(&self) -> &[ProductionPhaseRecord] {
        &self.records
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn estimated_completion(&self) -> Option<NaiveDateTime> {
        self.estimated_completion
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Looks up a record by id.
    pub fn record(&self, record_id: PhaseRecordId) -> Result<&ProductionPhaseRecord, DomainError> {
        self.records
            .iter()
            .find(|r| r.id() == record_id)
            .ok_or_else(|| record_not_found(record_id))
    }

    /// Records sorted on `phase_order`, records without an order last.
    pub fn ordered_records(&self) -> Vec<&ProductionPhaseRecord> {
        let mut ordered: Vec<&ProductionPhaseRecord> = self.records.iter().collect();
        ordered.sort_by_key(|r| (r.phase_order().is_none(), r.phase_order()));
        ordered
    }

    /// The record after `record_id` in this batch's realized phase list.
    pub fn next_record(
        &self,
        record_id: PhaseRecordId,
    ) -> Result<Option<&ProductionPhaseRecord>, DomainError> {
        let ordered = self.ordered_records();
        let idx = position_of(&ordered, record_id)?;
        Ok(ordered.get(idx + 1).copied())
    }

    /// The record before `record_id` in this batch's realized phase list.
    pub fn previous_record(
        &self,
        record_id: PhaseRecordId,
    ) -> Result<Option<&ProductionPhaseRecord>, DomainError> {
        let ordered = self.ordered_records();
        let idx = position_of(&ordered, record_id)?;
        Ok(idx.checked_sub(1).and_then(|i| ordered.get(i).copied()))
    }

    /// Checks that a record's output chains into the batch's next record.
    pub fn validate_chaining(&self, record_id: PhaseRecordId) -> Result<(), DomainError> {
        let record = self.record(record_id)?;
        record.validate_chaining(self.next_record(record_id)?)
    }

    /// True once every record has been accepted.
    pub fn is_complete(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|r| r.status() == PhaseStatus::Completada)
    }

    /// Sum of the dashboard waste of every settled record.
    pub fn total_waste(&self) -> f64 {
        self.records.iter().filter_map(|r| r.total_waste()).sum()
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Computes what `action` on `record_id` would change, at wall-clock `at`.
    pub fn plan_transition(
        &self,
        record_id: PhaseRecordId,
        action: PhaseAction,
        at: NaiveDateTime,
    ) -> Result<TransitionPlan, DomainError> {
        self.ensure_mutable()?;
        let record = self.record(record_id)?;
        let from = record.status();
        let to = PhaseWorkflow::transition(from, action)?;

        match action {
            PhaseAction::Start => self.ensure_previous_completed(record_id)?,
            PhaseAction::SubmitForReview => record.ensure_ready_for_review()?,
            PhaseAction::Approve => record.validate_chaining(self.next_record(record_id)?)?,
            _ => {}
        }

        let mut updated = record.clone();
        updated.set_status(to, at);

        let mut records = vec![updated];
        let mut batch_status = None;
        let mut notifications = Vec::new();
        let notify = |target, kind, related: PhaseRecordId| {
            Notification::new(target, kind, self.id, related)
        };

        match action {
            PhaseAction::SubmitForReview => {
                notifications.push(notify(
                    NotificationTarget::Role(Role::Calidad),
                    NotificationKind::PhaseUnderReview,
                    record_id,
                ));
            }
            PhaseAction::Approve => {
                if let Some(next) = self.next_record(record_id)? {
                    if let Some(sector) = next.sector_id() {
                        notifications.push(notify(
                            NotificationTarget::Sector(sector),
                            NotificationKind::NextPhaseReady,
                            next.id(),
                        ));
                    }
                }
                let all_accepted = self
                    .records
                    .iter()
                    .all(|r| r.id() == record_id || r.status() == PhaseStatus::Completada);
                if all_accepted {
                    batch_status = Some(self.status.transition_to(BatchStatus::Completado)?);
                }
            }
            PhaseAction::RequestAdjustment => {
                notifications.push(notify(
                    supervisor_target(record),
                    NotificationKind::AdjustmentRequired,
                    record_id,
                ));
            }
            PhaseAction::Reject => {
                batch_status = Some(self.status.transition_to(BatchStatus::Cancelado)?);
                for sibling in self
                    .records
                    .iter()
                    .filter(|r| r.id() != record_id && r.status().is_suspendable())
                {
                    let mut suspended = sibling.clone();
                    suspended.set_status(PhaseStatus::Suspendida, at);
                    records.push(suspended);
                }
                notifications.push(notify(
                    supervisor_target(record),
                    NotificationKind::PhaseRejected,
                    record_id,
                ));
                notifications.push(notify(
                    NotificationTarget::Role(Role::SupervisorProduccion),
                    NotificationKind::BatchCancelled,
                    record_id,
                ));
            }
            PhaseAction::Start | PhaseAction::Suspend => {}
        }

        Ok(TransitionPlan {
            batch_id: self.id,
            record_id,
            action,
            from,
            to,
            records,
            batch_status,
            notifications,
            base_version: self.version,
        })
    }

    /// Commits a plan computed by `plan_transition`.
    ///
    /// All or nothing: a plan computed against another version, or naming a
    /// record the batch does not own, changes nothing.
    pub fn apply_plan(&mut self, plan: TransitionPlan) -> Result<(), DomainError> {
        if plan.batch_id != self.id {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Transition plan belongs to another batch",
            )
            .with_detail("batch_id", self.id.to_string())
            .with_detail("plan_batch_id", plan.batch_id.to_string()));
        }
        if plan.base_version != self.version {
            return Err(DomainError::conflict(plan.base_version, self.version));
        }
        self.ensure_mutable()?;

        let positions = plan
            .records
            .iter()
            .map(|updated| {
                self.records
                    .iter()
                    .position(|r| r.id() == updated.id())
                    .ok_or_else(|| record_not_found(updated.id()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (pos, updated) in positions.into_iter().zip(plan.records) {
            self.records[pos] = updated;
        }
        if let Some(status) = plan.batch_status {
            self.status = status;
        }
        self.bump();
        Ok(())
    }

    /// Plans and applies in one call.
    pub fn transition(
        &mut self,
        record_id: PhaseRecordId,
        action: PhaseAction,
        at: NaiveDateTime,
    ) -> Result<Vec<Notification>, DomainError> {
        let plan = self.plan_transition(record_id, action, at)?;
        let notifications = plan.notifications.clone();
        self.apply_plan(plan)?;
        Ok(notifications)
    }

    // ───────────────────────────────────────────────────────────────
    // Measurements
    // ───────────────────────────────────────────────────────────────

    /// Enters quantities on one record.
    pub fn record_measurements(
        &mut self,
        record_id: PhaseRecordId,
        update: MeasurementUpdate,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.record_mut(record_id)?.record_measurements(update)?;
        self.bump();
        Ok(())
    }

    /// Adds handling waste to one record.
    pub fn add_movement_waste(
        &mut self,
        record_id: PhaseRecordId,
        amount: f64,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.record_mut(record_id)?.add_movement_waste(amount)?;
        self.bump();
        Ok(())
    }

    /// Replaces the projected completion time.
    pub fn set_estimated_completion(&mut self, at: Option<NaiveDateTime>) {
        self.estimated_completion = at;
        self.bump();
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            return Ok(());
        }
        Err(DomainError::new(
            ErrorCode::BatchClosed,
            format!("Batch is {} and accepts no changes", self.status),
        )
        .with_detail("batch_id", self.id.to_string()))
    }

    fn ensure_previous_completed(&self, record_id: PhaseRecordId) -> Result<(), DomainError> {
        match self.previous_record(record_id)? {
            Some(prev) if prev.status() != PhaseStatus::Completada => Err(DomainError::new(
                ErrorCode::PreviousPhaseIncomplete,
                format!("{} has not been completed yet", prev.phase_kind()),
            )
            .with_detail("previous_phase", prev.phase_kind().display_name())
            .with_detail("previous_status", format!("{:?}", prev.status()))),
            _ => Ok(()),
        }
    }

    fn record_mut(
        &mut self,
        record_id: PhaseRecordId,
    ) -> Result<&mut ProductionPhaseRecord, DomainError> {
        self.records
            .iter_mut()
            .find(|r| r.id() == record_id)
            .ok_or_else(|| record_not_found(record_id))
    }

    fn bump(&mut self) {
        self.version += 1;
        self.updated_at = Timestamp::now();
    }
}

fn position_of(
    ordered: &[&ProductionPhaseRecord],
    record_id: PhaseRecordId,
) -> Result<usize, DomainError> {
    ordered
        .iter()
        .position(|r| r.id() == record_id)
        .ok_or_else(|| record_not_found(record_id))
}

fn record_not_found(record_id: PhaseRecordId) -> DomainError {
    DomainError::new(ErrorCode::PhaseNotFound, "Phase record not found in batch")
        .with_detail("record_id", record_id.to_string())
}

/// The record's sector, or production supervisors when it has none.
fn supervisor_target(record: &ProductionPhaseRecord) -> NotificationTarget {
    record
        .sector_id()
        .map(NotificationTarget::Sector)
        .unwrap_or(NotificationTarget::Role(Role::SupervisorProduccion))
}
