//! Phase record command handlers.

mod record_measurements;
mod transition_phase;

pub use record_measurements::{
    RecordMeasurementsCommand, RecordMeasurementsHandler, RecordMeasurementsResult,
};
pub use transition_phase::{
    TransitionPhaseCommand, TransitionPhaseHandler, TransitionPhaseResult,
};
