//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod batch;
pub mod phase;
pub mod schedule;

pub use batch::{
    CreateBatchCommand, CreateBatchHandler, CreateBatchResult, GetBatchHandler, GetBatchQuery,
};
pub use phase::{
    RecordMeasurementsCommand, RecordMeasurementsHandler, RecordMeasurementsResult,
    TransitionPhaseCommand, TransitionPhaseHandler, TransitionPhaseResult,
};
pub use schedule::{EstimateCompletionHandler, EstimateCompletionQuery, EstimateCompletionResult};
