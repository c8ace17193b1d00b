//! PhaseStatus - lifecycle of a single production phase record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Status of a production phase record.
///
/// ```text
/// PENDIENTE -> EN_PROCESO -> BAJO_REVISION -> COMPLETADA
///                                          -> SIENDO_AJUSTADA -> BAJO_REVISION
///                                          -> RECHAZADA
/// any non-terminal -> SUSPENDIDA
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseStatus {
    #[default]
    Pendiente,
    EnProceso,
    BajoRevision,
    SiendoAjustada,
    Completada,
    Rechazada,
    Suspendida,
}

impl PhaseStatus {
    /// Returns true for the two outcomes a review can settle on.
    pub fn is_final(&self) -> bool {
        matches!(self, PhaseStatus::Completada | PhaseStatus::Rechazada)
    }

    /// Returns true while operators may still enter measurements.
    pub fn accepts_measurements(&self) -> bool {
        matches!(self, PhaseStatus::EnProceso | PhaseStatus::SiendoAjustada)
    }

    /// Returns true if the record can still be swept into a suspension.
    pub fn is_suspendable(&self) -> bool {
        self.can_transition_to(&PhaseStatus::Suspendida)
    }
}

impl StateMachine for PhaseStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use PhaseStatus::*;
        match self {
            Pendiente => vec![EnProceso, Suspendida],
            EnProceso => vec![BajoRevision, Suspendida],
            BajoRevision => vec![Completada, SiendoAjustada, Rechazada, Suspendida],
            SiendoAjustada => vec![BajoRevision, Suspendida],
            Completada | Rechazada | Suspendida => vec![],
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhaseStatus::Pendiente => "Pendiente",
            PhaseStatus::EnProceso => "En proceso",
            PhaseStatus::BajoRevision => "Bajo revisión",
            PhaseStatus::SiendoAjustada => "Siendo ajustada",
            PhaseStatus::Completada => "Completada",
            PhaseStatus::Rechazada => "Rechazada",
            PhaseStatus::Suspendida => "Suspendida",
        };
        write!(f, "{}", s)
    }
}
