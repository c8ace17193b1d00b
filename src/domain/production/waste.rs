//! Waste accounting for production phases.
//!
//! Product waste compares what a phase produced with what its recipe says
//! it should have produced for the amount it was actually fed. The rule is
//! evaluated in a fixed order:
//!
//! 1. Any measurement missing: not scored yet (`None`).
//! 2. `standard_input == 0`: waste is 0.
//! 3. Under-fed phase that converted everything it got
//!    (`input < standard_input` and `output == input`): waste is 0.
//! 4. Otherwise `standard_output * input / standard_input - output`,
//!    floored at 0. There is no upper cap.

use crate::domain::foundation::{same_quantity, PhaseStatus};

/// The four measurements the waste rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WasteMeasurements {
    pub input: Option<f64>,
    pub output: Option<f64>,
    pub standard_input: Option<f64>,
    pub standard_output: Option<f64>,
}

/// Computes process waste, or `None` while measurements are incomplete.
pub fn compute_product_waste(m: &WasteMeasurements) -> Option<f64> {
    let (input, output, standard_input, standard_output) =
        match (m.input, m.output, m.standard_input, m.standard_output) {
            (Some(i), Some(o), Some(si), Some(so)) => (i, o, si, so),
            _ => return None,
        };

    if standard_input == 0.0 {
        return Some(0.0);
    }

    if input < standard_input && same_quantity(output, input) {
        return Some(0.0);
    }

    let expected_output = standard_output * (input / standard_input);
    Some((expected_output - output).max(0.0))
}

/// Aggregate waste as reported for a settled phase.
///
/// A completed phase loses its process waste plus handling losses; a
/// rejected phase loses its whole output plus handling losses. Phases that
/// are not settled report `None`.
pub fn total_waste(
    status: PhaseStatus,
    product_waste: Option<f64>,
    output: Option<f64>,
    movement_waste: Option<f64>,
) -> Option<f64> {
    let movement = movement_waste.unwrap_or(0.0);
    match status {
        PhaseStatus::Completada => Some(product_waste.unwrap_or(0.0) + movement),
        PhaseStatus::Rechazada => Some(output.unwrap_or(0.0) + movement),
        _ => None,
    }
}
