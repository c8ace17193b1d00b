//! Product recipes: the per-phase plan a batch is realized from.

use serde::{Deserialize, Serialize};

use crate::domain::calendar::PhaseEstimate;
use crate::domain::foundation::{
    ensure_non_negative, DomainError, PhaseKind, ProductId, SectorId, UnitOfMeasure,
    ValidationError,
};

use super::PhaseSequence;

/// Recipe values for one phase of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePlan {
    pub kind: PhaseKind,
    pub estimated_hours: f64,
    pub standard_input: Option<f64>,
    pub standard_output: Option<f64>,
    pub output_unit: Option<UnitOfMeasure>,
    pub sector_id: Option<SectorId>,
}

impl PhasePlan {
    /// A plan carrying only a duration estimate.
    pub fn timed(kind: PhaseKind, estimated_hours: f64) -> Self {
        Self {
            kind,
            estimated_hours,
            standard_input: None,
            standard_output: None,
            output_unit: None,
            sector_id: None,
        }
    }

    /// Sets the standard quantities the phase expects and yields.
    pub fn with_standards(mut self, input: f64, output: f64, unit: UnitOfMeasure) -> Self {
        self.standard_input = Some(input);
        self.standard_output = Some(output);
        self.output_unit = Some(unit);
        self
    }

    /// Assigns the sector that runs the phase.
    pub fn in_sector(mut self, sector_id: SectorId) -> Self {
        self.sector_id = Some(sector_id);
        self
    }
}

/// A product and its production plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecipe {
    pub id: ProductId,
    pub name: String,
    pub is_alcoholic: bool,
    pub phases: Vec<PhasePlan>,
}

impl ProductRecipe {
    /// Creates a recipe, rejecting blank names and negative quantities.
    pub fn new(
        name: impl Into<String>,
        is_alcoholic: bool,
        phases: Vec<PhasePlan>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        for plan in &phases {
            ensure_non_negative("estimated_hours", plan.estimated_hours)?;
            if let Some(v) = plan.standard_input {
                ensure_non_negative("standard_input", v)?;
            }
            if let Some(v) = plan.standard_output {
                ensure_non_negative("standard_output", v)?;
            }
        }
        Ok(Self {
            id: ProductId::new(),
            name,
            is_alcoholic,
            phases,
        })
    }

    /// Plans for the variant's applicable phases, in sequence order.
    ///
    /// Applicable phases missing from the recipe get an empty plan;
    /// plans for phases the variant skips are ignored.
    pub fn applicable_plans(&self) -> Vec<PhasePlan> {
        PhaseSequence::ordered_phases(self.is_alcoholic)
            .into_iter()
            .map(|kind| {
                self.phases
                    .iter()
                    .find(|p| p.kind == kind)
                    .cloned()
                    .unwrap_or_else(|| PhasePlan::timed(kind, 0.0))
            })
            .collect()
    }

    /// Duration estimates in sequence order, for the schedule estimator.
    pub fn phase_estimates(&self) -> Vec<PhaseEstimate> {
        self.applicable_plans()
            .iter()
            .map(|p| PhaseEstimate::new(p.kind, p.estimated_hours))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applicable_plans_follow_variant_sequence() {
        let recipe = ProductRecipe::new(
            "Lager",
            true,
            vec![
                PhasePlan::timed(PhaseKind::Envasado, 4.0),
                PhasePlan::timed(PhaseKind::Molienda, 2.0),
                PhasePlan::timed(PhaseKind::Desalcoholizacion, 6.0),
            ],
        )
        .unwrap();

        let plans = recipe.applicable_plans();
        assert_eq!(plans.len(), 8);
        assert_eq!(plans[0].kind, PhaseKind::Molienda);
        assert_eq!(plans[0].estimated_hours, 2.0);
        assert_eq!(plans[7].kind, PhaseKind::Envasado);
        assert!(plans.iter().all(|p| p.kind != PhaseKind::Desalcoholizacion));
    }

    #[test]
    fn missing_plans_default_to_zero_hours() {
        let recipe = ProductRecipe::new("Sin", false, vec![]).unwrap();
        let estimates = recipe.phase_estimates();
        assert_eq!(estimates.len(), 9);
        assert!(estimates.iter().all(|e| e.estimated_hours == 0.0));
    }

    #[test]
    fn rejects_blank_name_and_negative_hours() {
        assert!(ProductRecipe::new(" ", true, vec![]).is_err());
        assert!(ProductRecipe::new(
            "Stout",
            true,
            vec![PhasePlan::timed(PhaseKind::Coccion, -1.0)]
        )
        .is_err());
    }
}
