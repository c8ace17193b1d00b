//! Schedule query handlers.

mod estimate_completion;

pub use estimate_completion::{
    EstimateCompletionHandler, EstimateCompletionQuery, EstimateCompletionResult,
};
