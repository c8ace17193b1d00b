//! Notifications emitted by phase transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{BatchId, PhaseRecordId, Role, SectorId};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NextPhaseReady,
    PhaseUnderReview,
    AdjustmentRequired,
    PhaseRejected,
    BatchCancelled,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::NextPhaseReady => "NEXT_PHASE_READY",
            NotificationKind::PhaseUnderReview => "PHASE_UNDER_REVIEW",
            NotificationKind::AdjustmentRequired => "ADJUSTMENT_REQUIRED",
            NotificationKind::PhaseRejected => "PHASE_REJECTED",
            NotificationKind::BatchCancelled => "BATCH_CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Who should hear about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum NotificationTarget {
    Sector(SectorId),
    Role(Role),
}

impl fmt::Display for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationTarget::Sector(id) => write!(f, "sector:{}", id),
            NotificationTarget::Role(role) => write!(f, "role:{}", role),
        }
    }
}

/// A fire-and-forget message for the notification sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub target: NotificationTarget,
    pub kind: NotificationKind,
    pub batch_id: BatchId,
    pub record_id: PhaseRecordId,
}

impl Notification {
    pub fn new(
        target: NotificationTarget,
        kind: NotificationKind,
        batch_id: BatchId,
        record_id: PhaseRecordId,
    ) -> Self {
        Self {
            target,
            kind,
            batch_id,
            record_id,
        }
    }
}
