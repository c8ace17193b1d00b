//! Quantity helpers and units of measure.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Tolerance used when comparing declared quantities.
pub const QUANTITY_EPSILON: f64 = 1e-9;

/// Unit a phase reports its output in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitOfMeasure {
    Kg,
    L,
    Hl,
    Unidades,
}

impl UnitOfMeasure {
    /// Returns the short symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitOfMeasure::Kg => "kg",
            UnitOfMeasure::L => "L",
            UnitOfMeasure::Hl => "hL",
            UnitOfMeasure::Unidades => "u",
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Numeric equality for quantities.
pub fn same_quantity(a: f64, b: f64) -> bool {
    (a - b).abs() <= QUANTITY_EPSILON
}

/// Rejects negative or non-finite quantities.
pub fn ensure_non_negative(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValidationError::negative_quantity(field, value));
    }
    Ok(value)
}
