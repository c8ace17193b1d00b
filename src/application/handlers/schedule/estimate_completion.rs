//! EstimateCompletionHandler - Query handler projecting a product's
//! completion date on the active work week.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::application::ActiveWorkWeek;
use crate::domain::calendar::{ScheduleBreakdown, ScheduleEstimator};
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::ProductRepository;

/// Query for the projected completion of a product started at `start`.
#[derive(Debug, Clone)]
pub struct EstimateCompletionQuery {
    pub product_id: ProductId,
    pub start: NaiveDateTime,
}

/// Projected completion and per-phase windows.
#[derive(Debug, Clone)]
pub struct EstimateCompletionResult {
    pub completion: NaiveDateTime,
    pub breakdown: ScheduleBreakdown,
}

/// Handler for completion estimates.
pub struct EstimateCompletionHandler {
    products: Arc<dyn ProductRepository>,
    work_week: Arc<ActiveWorkWeek>,
}

impl EstimateCompletionHandler {
    pub fn new(products: Arc<dyn ProductRepository>, work_week: Arc<ActiveWorkWeek>) -> Self {
        Self {
            products,
            work_week,
        }
    }

    pub async fn handle(
        &self,
        query: EstimateCompletionQuery,
    ) -> Result<EstimateCompletionResult, DomainError> {
        let recipe = self
            .products
            .find_by_id(&query.product_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProductNotFound, "Product not found")
                    .with_detail("product_id", query.product_id.to_string())
            })?;
        let calendar = self.work_week.current().await?;

        let breakdown =
            ScheduleEstimator::estimate_breakdown(&recipe.phase_estimates(), query.start, &calendar)?;
        Ok(EstimateCompletionResult {
            completion: breakdown.completion,
            breakdown,
        })
    }
}
