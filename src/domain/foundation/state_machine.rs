//! State machine trait for status enums.
//!
//! Phase and batch statuses implement this so every transition goes through
//! one audited table instead of scattered checks.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors list their legal targets; `can_transition_to` and the
/// checked `transition_to` are derived from that list.
///
/// # Example
///
/// ```ignore
/// let next = PhaseStatus::EnProceso.transition_to(PhaseStatus::BajoRevision)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            )
            .with_detail("from", format!("{:?}", self))
            .with_detail("to", format!("{:?}", target)))
        }
    }

    /// Checks if current state has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
