//! Plan inputs: goal, allocation, beneficiaries and scenario modifiers

mod data;
pub mod loader;

pub use data::{Beneficiaries, Beneficiary, Goal};
pub use loader::{load_plan, load_plan_from_reader, PlanFile};

use crate::allocation::Allocation;
use crate::error::PlanError;
use crate::scenario::ScenarioModifiers;

/// Everything the caller owns and edits between projections
///
/// The engine only reads a plan; after each edit the caller simply projects
/// again.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub goal: Goal,
    pub allocation: Allocation,
    pub beneficiaries: Beneficiaries,
    pub modifiers: ScenarioModifiers,
}

impl Plan {
    pub fn new(
        goal: Goal,
        allocation: Allocation,
        beneficiaries: Beneficiaries,
        modifiers: ScenarioModifiers,
    ) -> Self {
        Self {
            goal,
            allocation,
            beneficiaries,
            modifiers,
        }
    }

    /// Check everything that must hold before a projection is attempted
    ///
    /// Order: allocation weights, goal amount, then each beneficiary's horizon.
    pub fn validate(&self) -> Result<(), PlanError> {
        if let Some(err) = self.allocation.error() {
            return Err((*err).into());
        }
        self.goal.validate()?;
        validate_horizons(&self.goal, self.beneficiaries.as_slice())
    }
}

/// Every beneficiary must be younger than the target age
pub fn validate_horizons(goal: &Goal, beneficiaries: &[Beneficiary]) -> Result<(), PlanError> {
    for b in beneficiaries {
        if goal.horizon_years(b.current_age) <= 0 {
            return Err(PlanError::BeneficiaryHorizon {
                beneficiary_id: b.id,
                current_age: b.current_age,
                target_age: goal.target_age,
            });
        }
    }
    Ok(())
}
