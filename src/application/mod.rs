//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

mod active_work_week;
mod authorization;
pub mod handlers;
mod notify;

pub use active_work_week::ActiveWorkWeek;
pub use handlers::{
    // Batch handlers
    CreateBatchCommand, CreateBatchHandler, CreateBatchResult, GetBatchHandler, GetBatchQuery,
    // Phase handlers
    RecordMeasurementsCommand, RecordMeasurementsHandler, RecordMeasurementsResult,
    TransitionPhaseCommand, TransitionPhaseHandler, TransitionPhaseResult,
    // Schedule handlers
    EstimateCompletionHandler, EstimateCompletionQuery, EstimateCompletionResult,
};
