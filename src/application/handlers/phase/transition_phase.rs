//! TransitionPhaseHandler - Command handler for moving a phase record
//! through the workflow.
//!
//! Load, authorize, plan, apply, persist under the loaded version, then
//! notify. Notification failures are logged and never fail the command.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::application::authorization::authorize;
use crate::application::handlers::batch::batch_not_found;
use crate::application::notify::dispatch;
use crate::domain::foundation::{
    BatchId, CommandMetadata, DomainError, PhaseRecordId, PhaseStatus,
};
use crate::domain::production::{Batch, Notification, PhaseAction};
use crate::ports::{AccessPolicy, BatchRepository, NotificationSink};

/// Command to apply a workflow action to a phase record.
#[derive(Debug, Clone)]
pub struct TransitionPhaseCommand {
    pub batch_id: BatchId,
    pub record_id: PhaseRecordId,
    pub action: PhaseAction,
    /// Local wall-clock time the action happened.
    pub at: NaiveDateTime,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct TransitionPhaseResult {
    pub batch: Batch,
    pub from: PhaseStatus,
    pub to: PhaseStatus,
    /// Siblings suspended alongside the record.
    pub cascaded: usize,
    pub notifications: Vec<Notification>,
}

/// Handler for phase workflow transitions.
pub struct TransitionPhaseHandler {
    batches: Arc<dyn BatchRepository>,
    access_policy: Arc<dyn AccessPolicy>,
    notifications: Arc<dyn NotificationSink>,
}

impl TransitionPhaseHandler {
    pub fn new(
        batches: Arc<dyn BatchRepository>,
        access_policy: Arc<dyn AccessPolicy>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            batches,
            access_policy,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: TransitionPhaseCommand,
        metadata: CommandMetadata,
    ) -> Result<TransitionPhaseResult, DomainError> {
        let correlation_id = metadata.correlation_id();

        // 1. Load the batch
        let mut batch = self
            .batches
            .find_by_id(&cmd.batch_id)
            .await?
            .ok_or_else(|| batch_not_found(cmd.batch_id))?;

        // 2. Authorize against the record's sector or the reviewer role
        let record = batch.record(cmd.record_id)?;
        authorize(
            self.access_policy.as_ref(),
            &metadata,
            cmd.action.name(),
            cmd.action.required_permission(),
            record,
        )
        .await?;

        // 3. Plan and apply (domain validates the transition)
        let plan = batch
            .plan_transition(cmd.record_id, cmd.action, cmd.at)
            .inspect_err(|err| {
                tracing::warn!(
                    batch_id = %cmd.batch_id,
                    record_id = %cmd.record_id,
                    action = %cmd.action,
                    error = %err,
                    "transition rejected"
                );
            })?;
        let (from, to, cascaded) = (plan.from, plan.to, plan.cascaded());
        let notifications = plan.notifications.clone();
        let expected_version = batch.version();
        batch.apply_plan(plan)?;

        // 4. Persist record, siblings and batch status in one update
        self.batches
            .update(&batch, expected_version)
            .await
            .inspect_err(|err| {
                tracing::warn!(
                    batch_id = %cmd.batch_id,
                    expected_version,
                    error = %err,
                    "transition not persisted"
                );
            })?;

        tracing::info!(
            batch_id = %cmd.batch_id,
            record_id = %cmd.record_id,
            action = %cmd.action,
            from = %from,
            to = %to,
            cascaded,
            batch_status = %batch.status(),
            user_id = %metadata.user_id,
            correlation_id = %correlation_id,
            "phase transitioned"
        );

        // 5. Notify, fire-and-forget
        dispatch(self.notifications.as_ref(), &notifications, &correlation_id).await;

        Ok(TransitionPhaseResult {
            batch,
            from,
            to,
            cascaded,
            notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryBatchRepository, RecordingNotificationSink, StaticAccessPolicy};
    use crate::domain::foundation::{
        BatchStatus, ErrorCode, PhaseKind, ProductId, Role, SectorId, UnitOfMeasure, UserId,
    };
    use crate::domain::production::{
        MeasurementUpdate, NotificationKind, PhasePlan, ProductRecipe,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    /// Repository whose stored copy moves on behind the handler's back.
    struct RacingBatchRepository {
        batch: Mutex<Batch>,
        updates: Mutex<usize>,
    }

    #[async_trait]
    impl BatchRepository for RacingBatchRepository {
        async fn save(&self, _: &Batch) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(&self, _: &Batch, expected_version: u64) -> Result<(), DomainError> {
            *self.updates.lock().unwrap() += 1;
            let stored = self.batch.lock().unwrap().version() + 1;
            Err(DomainError::conflict(expected_version, stored))
        }

        async fn find_by_id(&self, _: &BatchId) -> Result<Option<Batch>, DomainError> {
            Ok(Some(self.batch.lock().unwrap().clone()))
        }

        async fn find_by_product(&self, _: &ProductId) -> Result<Vec<Batch>, DomainError> {
            Ok(vec![])
        }

        async fn find_by_status(&self, _: BatchStatus) -> Result<Vec<Batch>, DomainError> {
            Ok(vec![])
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Test helpers
    // ─────────────────────────────────────────────────────────────────────

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn supervisor() -> UserId {
        UserId::new("supervisor-molienda").unwrap()
    }

    fn reviewer() -> UserId {
        UserId::new("qa-1").unwrap()
    }

    struct Fixture {
        batch: Batch,
        milling_sector: SectorId,
        repo: Arc<InMemoryBatchRepository>,
        sink: Arc<RecordingNotificationSink>,
        handler: TransitionPhaseHandler,
    }

    async fn fixture_with_sink(sink: RecordingNotificationSink) -> Fixture {
        let milling_sector = SectorId::new();
        let plans = vec![
            PhasePlan::timed(PhaseKind::Molienda, 2.0)
                .with_standards(100.0, 95.0, UnitOfMeasure::Kg)
                .in_sector(milling_sector),
            PhasePlan::timed(PhaseKind::Maceracion, 3.0)
                .with_standards(95.0, 400.0, UnitOfMeasure::Kg)
                .in_sector(SectorId::new()),
        ];
        let recipe = ProductRecipe::new("Lager", true, plans).unwrap();
        let batch = Batch::create(&recipe, at(8), None);

        let repo = Arc::new(InMemoryBatchRepository::new());
        repo.save(&batch).await.unwrap();
        let policy = StaticAccessPolicy::new()
            .with_supervisor(supervisor(), milling_sector)
            .with_role(reviewer(), Role::Calidad);
        let sink = Arc::new(sink);
        let handler = TransitionPhaseHandler::new(repo.clone(), Arc::new(policy), sink.clone());

        Fixture {
            batch,
            milling_sector,
            repo,
            sink,
            handler,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with_sink(RecordingNotificationSink::new()).await
    }

    fn milling(batch: &Batch) -> PhaseRecordId {
        batch.ordered_records()[0].id()
    }

    fn cmd(batch: &Batch, action: PhaseAction, hour: u32) -> TransitionPhaseCommand {
        TransitionPhaseCommand {
            batch_id: batch.id(),
            record_id: milling(batch),
            action,
            at: at(hour),
        }
    }

    fn as_user(user: UserId) -> CommandMetadata {
        CommandMetadata::new(user).with_correlation_id("test-correlation")
    }

    /// Starts milling, records quantities and submits it, persisting each step.
    async fn milling_under_review(f: &Fixture) -> Batch {
        f.handler
            .handle(cmd(&f.batch, PhaseAction::Start, 9), as_user(supervisor()))
            .await
            .unwrap();
        let mut batch = f.repo.find_by_id(&f.batch.id()).await.unwrap().unwrap();
        let expected = batch.version();
        batch
            .record_measurements(milling(&batch), MeasurementUpdate::declared(100.0, 94.0))
            .unwrap();
        f.repo.update(&batch, expected).await.unwrap();
        f.handler
            .handle(
                cmd(&f.batch, PhaseAction::SubmitForReview, 11),
                as_user(supervisor()),
            )
            .await
            .unwrap()
            .batch
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn supervisor_starts_phase() {
        let f = fixture().await;
        let result = f
            .handler
            .handle(cmd(&f.batch, PhaseAction::Start, 9), as_user(supervisor()))
            .await
            .unwrap();

        assert_eq!(result.from, PhaseStatus::Pendiente);
        assert_eq!(result.to, PhaseStatus::EnProceso);
        let stored = f.repo.find_by_id(&f.batch.id()).await.unwrap().unwrap();
        assert_eq!(stored.record(milling(&stored)).unwrap().start_date(), Some(at(9)));
        assert_eq!(stored.version(), 1);
    }

    #[tokio::test]
    async fn other_user_cannot_start_phase() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(cmd(&f.batch, PhaseAction::Start, 9), as_user(reviewer()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        let stored = f.repo.find_by_id(&f.batch.id()).await.unwrap().unwrap();
        assert_eq!(stored.version(), 0);
    }

    #[tokio::test]
    async fn supervisor_cannot_review() {
        let f = fixture().await;
        milling_under_review(&f).await;
        let err = f
            .handler
            .handle(cmd(&f.batch, PhaseAction::Approve, 12), as_user(supervisor()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn submit_notifies_quality() {
        let f = fixture().await;
        milling_under_review(&f).await;

        let sent = f.sink.of_kind(NotificationKind::PhaseUnderReview).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].record_id, milling(&f.batch));
    }

    #[tokio::test]
    async fn approval_scores_waste_and_notifies_next_sector() {
        let f = fixture().await;
        milling_under_review(&f).await;

        let result = f
            .handler
            .handle(cmd(&f.batch, PhaseAction::Approve, 12), as_user(reviewer()))
            .await
            .unwrap();

        let record = result.batch.record(milling(&f.batch)).unwrap();
        assert_eq!(record.status(), PhaseStatus::Completada);
        assert!((record.product_waste().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(f.sink.of_kind(NotificationKind::NextPhaseReady).await.len(), 1);
    }

    #[tokio::test]
    async fn rejection_cancels_batch_and_suspends_siblings() {
        let f = fixture().await;
        milling_under_review(&f).await;

        let result = f
            .handler
            .handle(cmd(&f.batch, PhaseAction::Reject, 12), as_user(reviewer()))
            .await
            .unwrap();

        assert_eq!(result.cascaded, 7);
        let stored = f.repo.find_by_id(&f.batch.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), BatchStatus::Cancelado);
        assert!(stored
            .records()
            .iter()
            .filter(|r| r.id() != milling(&stored))
            .all(|r| r.status() == PhaseStatus::Suspendida));

        let rejected = f.sink.of_kind(NotificationKind::PhaseRejected).await;
        assert_eq!(
            rejected[0].target,
            crate::domain::production::NotificationTarget::Sector(f.milling_sector)
        );
        assert_eq!(f.sink.of_kind(NotificationKind::BatchCancelled).await.len(), 1);
    }

    #[tokio::test]
    async fn invalid_transition_is_reported_and_not_persisted() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(cmd(&f.batch, PhaseAction::Approve, 9), as_user(reviewer()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(f.sink.count().await, 0);
    }

    #[tokio::test]
    async fn failing_sink_does_not_fail_transition() {
        let f = fixture_with_sink(RecordingNotificationSink::failing()).await;
        f.handler
            .handle(cmd(&f.batch, PhaseAction::Start, 9), as_user(supervisor()))
            .await
            .unwrap();

        let mut batch = f.repo.find_by_id(&f.batch.id()).await.unwrap().unwrap();
        let expected = batch.version();
        batch
            .record_measurements(milling(&batch), MeasurementUpdate::declared(100.0, 94.0))
            .unwrap();
        f.repo.update(&batch, expected).await.unwrap();

        let result = f
            .handler
            .handle(
                cmd(&f.batch, PhaseAction::SubmitForReview, 11),
                as_user(supervisor()),
            )
            .await
            .unwrap();
        assert_eq!(result.to, PhaseStatus::BajoRevision);
        assert_eq!(result.notifications.len(), 1);
        assert_eq!(f.sink.count().await, 0);
    }

    #[tokio::test]
    async fn concurrent_change_surfaces_as_conflict() {
        let f = fixture().await;
        let repo = Arc::new(RacingBatchRepository {
            batch: Mutex::new(f.batch.clone()),
            updates: Mutex::new(0),
        });
        let sink = Arc::new(RecordingNotificationSink::new());
        let policy = StaticAccessPolicy::new().with_supervisor(supervisor(), f.milling_sector);
        let handler = TransitionPhaseHandler::new(repo.clone(), Arc::new(policy), sink.clone());

        let err = handler
            .handle(cmd(&f.batch, PhaseAction::Start, 9), as_user(supervisor()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ConcurrentModification);
        assert!(err.is_retryable());
        assert_eq!(*repo.updates.lock().unwrap(), 1);
        assert_eq!(sink.count().await, 0);
    }

    #[tokio::test]
    async fn unknown_batch_is_not_found() {
        let f = fixture().await;
        let mut command = cmd(&f.batch, PhaseAction::Start, 9);
        command.batch_id = BatchId::new();
        let err = f
            .handler
            .handle(command, as_user(supervisor()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BatchNotFound);
    }
}
