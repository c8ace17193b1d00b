//! PhaseKind - the static catalog of production phases.
//!
//! Every phase carries an intrinsic order (1..=9) that is a total order over
//! all phases, regardless of which subset a product actually uses, and a flag
//! saying whether it consumes supervised working hours or runs unattended.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A production phase kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    Molienda,
    Maceracion,
    Filtracion,
    Coccion,
    Fermentacion,
    Maduracion,
    Gasificacion,
    Desalcoholizacion,
    Envasado,
}

impl PhaseKind {
    /// Every phase kind in catalog order.
    pub const ALL: [PhaseKind; 9] = [
        PhaseKind::Molienda,
        PhaseKind::Maceracion,
        PhaseKind::Filtracion,
        PhaseKind::Coccion,
        PhaseKind::Fermentacion,
        PhaseKind::Maduracion,
        PhaseKind::Gasificacion,
        PhaseKind::Desalcoholizacion,
        PhaseKind::Envasado,
    ];

    /// Returns all phase kinds in catalog order.
    pub fn all() -> &'static [PhaseKind; 9] {
        &Self::ALL
    }

    /// Intrinsic 1-based order of this phase in the catalog.
    pub fn order(&self) -> u8 {
        match self {
            PhaseKind::Molienda => 1,
            PhaseKind::Maceracion => 2,
            PhaseKind::Filtracion => 3,
            PhaseKind::Coccion => 4,
            PhaseKind::Fermentacion => 5,
            PhaseKind::Maduracion => 6,
            PhaseKind::Gasificacion => 7,
            PhaseKind::Desalcoholizacion => 8,
            PhaseKind::Envasado => 9,
        }
    }

    /// Looks a phase up by its catalog order.
    pub fn from_order(order: u8) -> Result<PhaseKind, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.order() == order)
            .ok_or_else(|| ValidationError::out_of_range("phase_order", 1, 9, order as i64))
    }

    /// True for phases that only progress during working hours.
    ///
    /// Fermentation and maturation run unattended through nights and
    /// weekends; every other phase needs a supervised shift.
    pub fn is_time_active(&self) -> bool {
        !matches!(self, PhaseKind::Fermentacion | PhaseKind::Maduracion)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PhaseKind::Molienda => "Molienda",
            PhaseKind::Maceracion => "Maceración",
            PhaseKind::Filtracion => "Filtración",
            PhaseKind::Coccion => "Cocción",
            PhaseKind::Fermentacion => "Fermentación",
            PhaseKind::Maduracion => "Maduración",
            PhaseKind::Gasificacion => "Gasificación",
            PhaseKind::Desalcoholizacion => "Desalcoholización",
            PhaseKind::Envasado => "Envasado",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_phases_in_order() {
        let orders: Vec<u8> = PhaseKind::all().iter().map(|k| k.order()).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn only_fermentation_and_maturation_are_passive() {
        let passive: Vec<PhaseKind> = PhaseKind::all()
            .iter()
            .copied()
            .filter(|k| !k.is_time_active())
            .collect();
        assert_eq!(passive, vec![PhaseKind::Fermentacion, PhaseKind::Maduracion]);
    }

    #[test]
    fn from_order_round_trips_catalog() {
        for kind in PhaseKind::all() {
            assert_eq!(PhaseKind::from_order(kind.order()).unwrap(), *kind);
        }
    }

    #[test]
    fn from_order_rejects_out_of_range() {
        assert!(PhaseKind::from_order(0).is_err());
        assert!(PhaseKind::from_order(10).is_err());
    }

    #[test]
    fn derived_ord_matches_catalog_order() {
        assert!(PhaseKind::Gasificacion < PhaseKind::Desalcoholizacion);
        assert!(PhaseKind::Desalcoholizacion < PhaseKind::Envasado);
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        let json = serde_json::to_string(&PhaseKind::Desalcoholizacion).unwrap();
        assert_eq!(json, "\"DESALCOHOLIZACION\"");

        let kind: PhaseKind = serde_json::from_str("\"MOLIENDA\"").unwrap();
        assert_eq!(kind, PhaseKind::Molienda);
    }

    #[test]
    fn display_uses_display_name() {
        assert_eq!(format!("{}", PhaseKind::Coccion), "Cocción");
    }
}
