//! BatchStatus enum for the lifecycle of a production batch.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a production batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    #[default]
    EnProduccion,
    Completado,
    Cancelado,
}

impl BatchStatus {
    /// Returns true if phases of the batch may still change.
    pub fn is_mutable(&self) -> bool {
        matches!(self, BatchStatus::EnProduccion)
    }
}

impl StateMachine for BatchStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            BatchStatus::EnProduccion => vec![BatchStatus::Completado, BatchStatus::Cancelado],
            BatchStatus::Completado | BatchStatus::Cancelado => vec![],
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BatchStatus::EnProduccion => "En producción",
            BatchStatus::Completado => "Completado",
            BatchStatus::Cancelado => "Cancelado",
        };
        write!(f, "{}", s)
    }
}
