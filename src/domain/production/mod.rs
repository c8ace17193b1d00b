//! Production module - batches, their phase records and the phase workflow.
//!
//! # Module Organization
//!
//! - `phase_sequence` - Variant-dependent ordering of phases
//! - `waste` - Product and dashboard waste rules
//! - `phase_record` - One phase of one batch
//! - `recipe` - Per-product phase plans
//! - `workflow` - Actions and the status transition table
//! - `notification` - Messages emitted by transitions
//! - `batch` - The aggregate root and transition planning

mod batch;
mod notification;
mod phase_record;
mod phase_sequence;
mod recipe;
mod waste;
mod workflow;

pub use batch::{Batch, TransitionPlan};
pub use notification::{Notification, NotificationKind, NotificationTarget};
pub use phase_record::{MeasurementUpdate, ProductionPhaseRecord};
pub use phase_sequence::PhaseSequence;
pub use recipe::{PhasePlan, ProductRecipe};
pub use waste::{compute_product_waste, total_waste, WasteMeasurements};
pub use workflow::{PhaseAction, PhaseWorkflow};

#[cfg(test)]
pub(crate) use phase_record::test_support;
