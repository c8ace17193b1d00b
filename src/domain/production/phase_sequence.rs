//! PhaseSequence - ordering of production phases per product variant.
//!
//! Every product runs the same seven-phase core, then non-alcoholic products
//! insert de-alcoholisation, and packaging always comes last:
//!
//! ```text
//! MOLIENDA -> MACERACION -> FILTRACION -> COCCION -> FERMENTACION ->
//! MADURACION -> GASIFICACION -> [DESALCOHOLIZACION] -> ENVASADO
//! ```
//!
//! Queries with a phase that does not apply to the variant answer `None`
//! (or `false`) rather than failing, since callers often ask before they
//! know the variant.

use crate::domain::foundation::PhaseKind;

/// Phases shared by every product variant, in order.
const CORE_PHASES: [PhaseKind; 7] = [
    PhaseKind::Molienda,
    PhaseKind::Maceracion,
    PhaseKind::Filtracion,
    PhaseKind::Coccion,
    PhaseKind::Fermentacion,
    PhaseKind::Maduracion,
    PhaseKind::Gasificacion,
];

/// Central location for variant-dependent phase ordering.
pub struct PhaseSequence;

impl PhaseSequence {
    /// Returns the applicable phases for a product variant, in order.
    pub fn ordered_phases(is_alcoholic: bool) -> Vec<PhaseKind> {
        let mut phases = CORE_PHASES.to_vec();
        if !is_alcoholic {
            phases.push(PhaseKind::Desalcoholizacion);
        }
        phases.push(PhaseKind::Envasado);
        phases
    }

    /// Returns the 0-based position of a phase in the variant's sequence.
    pub fn position(kind: PhaseKind, is_alcoholic: bool) -> Option<usize> {
        Self::ordered_phases(is_alcoholic)
            .iter()
            .position(|&k| k == kind)
    }

    /// Returns true if the phase is part of the variant's sequence.
    pub fn contains(kind: PhaseKind, is_alcoholic: bool) -> bool {
        Self::position(kind, is_alcoholic).is_some()
    }

    /// Returns the next phase, or None at the end or for an inapplicable phase.
    pub fn next(kind: PhaseKind, is_alcoholic: bool) -> Option<PhaseKind> {
        let phases = Self::ordered_phases(is_alcoholic);
        let idx = phases.iter().position(|&k| k == kind)?;
        phases.get(idx + 1).copied()
    }

    /// Returns the previous phase, or None at the start or for an inapplicable phase.
    pub fn previous(kind: PhaseKind, is_alcoholic: bool) -> Option<PhaseKind> {
        let phases = Self::ordered_phases(is_alcoholic);
        let idx = phases.iter().position(|&k| k == kind)?;
        idx.checked_sub(1).and_then(|prev| phases.get(prev).copied())
    }

    /// Returns true iff both phases apply and `a` precedes `b`.
    pub fn comes_before(a: PhaseKind, b: PhaseKind, is_alcoholic: bool) -> bool {
        match (
            Self::position(a, is_alcoholic),
            Self::position(b, is_alcoholic),
        ) {
            (Some(ia), Some(ib)) => ia < ib,
            _ => false,
        }
    }

    /// Returns the first phase of every variant.
    pub fn first(is_alcoholic: bool) -> PhaseKind {
        Self::ordered_phases(is_alcoholic)[0]
    }

    /// Returns the last phase of every variant.
    pub fn last(is_alcoholic: bool) -> PhaseKind {
        let phases = Self::ordered_phases(is_alcoholic);
        phases[phases.len() - 1]
    }
}
