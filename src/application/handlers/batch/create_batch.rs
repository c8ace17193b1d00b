//! CreateBatchHandler - Command handler for starting a production batch.
//!
//! Realizes one pending phase record per applicable recipe phase and stamps
//! the projected completion from the active work week.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::application::ActiveWorkWeek;
use crate::domain::calendar::ScheduleEstimator;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ProductId};
use crate::domain::production::Batch;
use crate::ports::{BatchRepository, ProductRepository};

/// Command to start a batch of a product.
#[derive(Debug, Clone)]
pub struct CreateBatchCommand {
    pub product_id: ProductId,
    /// Local wall-clock start of production.
    pub started_at: NaiveDateTime,
}

/// Result of successfully creating a batch.
#[derive(Debug, Clone)]
pub struct CreateBatchResult {
    pub batch: Batch,
}

/// Handler for creating batches.
pub struct CreateBatchHandler {
    products: Arc<dyn ProductRepository>,
    batches: Arc<dyn BatchRepository>,
    work_week: Arc<ActiveWorkWeek>,
}

impl CreateBatchHandler {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        batches: Arc<dyn BatchRepository>,
        work_week: Arc<ActiveWorkWeek>,
    ) -> Self {
        Self {
            products,
            batches,
            work_week,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBatchCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateBatchResult, DomainError> {
        // 1. Load the recipe
        let recipe = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProductNotFound, "Product not found")
                    .with_detail("product_id", cmd.product_id.to_string())
            })?;

        // 2. Project completion on the active calendar
        let calendar = self.work_week.current().await?;
        let completion = ScheduleEstimator::estimate_completion(
            &recipe.phase_estimates(),
            cmd.started_at,
            &calendar,
        )?;

        // 3. Create and persist
        let batch = Batch::create(&recipe, cmd.started_at, Some(completion));
        self.batches.save(&batch).await?;

        tracing::info!(
            batch_id = %batch.id(),
            product = %recipe.name,
            phases = batch.records().len(),
            estimated_completion = %completion,
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            "batch created"
        );

        Ok(CreateBatchResult { batch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryBatchRepository, InMemoryProductRepository, InMemoryWorkWeekRepository,
    };
    use crate::domain::calendar::WorkWeekCalendar;
    use crate::domain::foundation::{BatchStatus, PhaseKind, UserId};
    use crate::domain::production::{PhasePlan, ProductRecipe};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    struct FailingBatchRepository;

    #[async_trait]
    impl BatchRepository for FailingBatchRepository {
        async fn save(&self, _: &Batch) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated save failure"))
        }
        async fn update(&self, _: &Batch, _: u64) -> Result<(), DomainError> {
            Ok(())
        }
        async fn find_by_id(
            &self,
            _: &crate::domain::foundation::BatchId,
        ) -> Result<Option<Batch>, DomainError> {
            Ok(None)
        }
        async fn find_by_product(&self, _: &ProductId) -> Result<Vec<Batch>, DomainError> {
            Ok(vec![])
        }
        async fn find_by_status(&self, _: BatchStatus) -> Result<Vec<Batch>, DomainError> {
            Ok(vec![])
        }
    }

    fn monday(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("planner").unwrap()).with_correlation_id("test-correlation")
    }

    fn recipe() -> ProductRecipe {
        ProductRecipe::new(
            "Lager",
            true,
            vec![
                PhasePlan::timed(PhaseKind::Molienda, 4.0),
                PhasePlan::timed(PhaseKind::Fermentacion, 48.0),
            ],
        )
        .unwrap()
    }

    fn work_week() -> Arc<ActiveWorkWeek> {
        let calendar = WorkWeekCalendar::uniform(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        )
        .unwrap();
        Arc::new(ActiveWorkWeek::new(
            Arc::new(InMemoryWorkWeekRepository::with_active(calendar)),
            WorkWeekCalendar::standard(),
        ))
    }

    #[tokio::test]
    async fn creates_batch_with_projected_completion() {
        let recipe = recipe();
        let products = Arc::new(InMemoryProductRepository::with_recipes([recipe.clone()]));
        let batches = Arc::new(InMemoryBatchRepository::new());
        let handler = CreateBatchHandler::new(products, batches.clone(), work_week());

        let result = handler
            .handle(
                CreateBatchCommand {
                    product_id: recipe.id,
                    started_at: monday(8),
                },
                metadata(),
            )
            .await
            .unwrap();

        // 4h milling ends 12:00, then 48h fermentation
        let expected = NaiveDate::from_ymd_opt(2024, 3, 6)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(result.batch.estimated_completion(), Some(expected));
        assert_eq!(result.batch.records().len(), 8);
        assert_eq!(batches.count().await, 1);
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let handler = CreateBatchHandler::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryBatchRepository::new()),
            work_week(),
        );
        let err = handler
            .handle(
                CreateBatchCommand {
                    product_id: ProductId::new(),
                    started_at: monday(8),
                },
                metadata(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }

    #[tokio::test]
    async fn save_failure_propagates() {
        let recipe = recipe();
        let handler = CreateBatchHandler::new(
            Arc::new(InMemoryProductRepository::with_recipes([recipe.clone()])),
            Arc::new(FailingBatchRepository),
            work_week(),
        );
        let err = handler
            .handle(
                CreateBatchCommand {
                    product_id: recipe.id,
                    started_at: monday(8),
                },
                metadata(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn unschedulable_duration_fails_without_saving() {
        let recipe = ProductRecipe::new(
            "Huge",
            true,
            vec![PhasePlan::timed(PhaseKind::Fermentacion, 1e10)],
        )
        .unwrap();
        let batches = Arc::new(InMemoryBatchRepository::new());
        let handler = CreateBatchHandler::new(
            Arc::new(InMemoryProductRepository::with_recipes([recipe.clone()])),
            batches.clone(),
            work_week(),
        );

        let err = handler
            .handle(
                CreateBatchCommand {
                    product_id: recipe.id,
                    started_at: monday(8),
                },
                metadata(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(batches.count().await, 0);
    }
}
