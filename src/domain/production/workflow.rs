//! PhaseWorkflow - actions on a phase record and the table that governs them.
//!
//! Every legal move is one row of `PhaseWorkflow::next_status`; anything not
//! in the table is an invalid transition. Each action also names the
//! permission a caller must hold, which the application layer checks against
//! the caller-supplied access policy before planning the transition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    DomainError, ErrorCode, Permission, PhaseStatus, Role, StateMachine,
};

/// Something a supervisor or reviewer does to a phase record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseAction {
    Start,
    SubmitForReview,
    Approve,
    RequestAdjustment,
    Reject,
    Suspend,
}

impl PhaseAction {
    pub const ALL: [PhaseAction; 6] = [
        PhaseAction::Start,
        PhaseAction::SubmitForReview,
        PhaseAction::Approve,
        PhaseAction::RequestAdjustment,
        PhaseAction::Reject,
        PhaseAction::Suspend,
    ];

    /// Stable name used in logs and authorization results.
    pub fn name(&self) -> &'static str {
        match self {
            PhaseAction::Start => "start",
            PhaseAction::SubmitForReview => "submit_for_review",
            PhaseAction::Approve => "approve",
            PhaseAction::RequestAdjustment => "request_adjustment",
            PhaseAction::Reject => "reject",
            PhaseAction::Suspend => "suspend",
        }
    }

    /// Who may perform this action.
    pub fn required_permission(&self) -> Permission {
        match self {
            PhaseAction::Start | PhaseAction::SubmitForReview | PhaseAction::Suspend => {
                Permission::SectorSupervisor
            }
            PhaseAction::Approve | PhaseAction::RequestAdjustment | PhaseAction::Reject => {
                Permission::Role(Role::Calidad)
            }
        }
    }

    /// True for the three outcomes of a quality review.
    pub fn is_review(&self) -> bool {
        matches!(self.required_permission(), Permission::Role(Role::Calidad))
    }
}

impl fmt::Display for PhaseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The phase status transition table.
pub struct PhaseWorkflow;

impl PhaseWorkflow {
    /// Returns the status `action` leads to from `from`, if legal.
    pub fn next_status(from: PhaseStatus, action: PhaseAction) -> Option<PhaseStatus> {
        use PhaseAction::*;
        use PhaseStatus::*;
        match (from, action) {
            (Pendiente, Start) => Some(EnProceso),
            (EnProceso, SubmitForReview) | (SiendoAjustada, SubmitForReview) => Some(BajoRevision),
            (BajoRevision, Approve) => Some(Completada),
            (BajoRevision, RequestAdjustment) => Some(SiendoAjustada),
            (BajoRevision, Reject) => Some(Rechazada),
            (status, Suspend) if status.is_suspendable() => Some(Suspendida),
            _ => None,
        }
    }

    /// Like `next_status`, but as an error for callers.
    pub fn transition(from: PhaseStatus, action: PhaseAction) -> Result<PhaseStatus, DomainError> {
        let to = Self::next_status(from, action).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot {} a phase that is {}", action, from),
            )
            .with_detail("from", format!("{:?}", from))
            .with_detail("action", action.name())
        })?;
        from.transition_to(to)
    }

    /// Actions available from a status.
    pub fn available_actions(from: PhaseStatus) -> Vec<PhaseAction> {
        PhaseAction::ALL
            .into_iter()
            .filter(|a| Self::next_status(from, *a).is_some())
            .collect()
    }
}
