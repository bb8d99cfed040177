//! Projection of every beneficiary under the three return scenarios

use super::growth::{project_growth, required_monthly_contribution};
use super::results::{PlanProjection, ProjectionResult, ScenarioProjection};
use crate::catalog::AssetCatalog;
use crate::error::PlanError;
use crate::plan::{validate_horizons, Beneficiary, Goal, Plan};
use crate::scenario::{Scenario, ScenarioModifiers, ScenarioRates};
use log::{debug, info};
use std::collections::HashMap;

/// Project every beneficiary towards the shared goal
///
/// The monthly contribution is solved once per beneficiary from the base
/// rate and then reused for the conservative and optimistic trajectories, so
/// those show what the base-case contribution yields under other markets.
/// All horizons are validated before anything is computed; either every
/// beneficiary gets a result or an error is returned.
pub fn compute_all(
    beneficiaries: &[Beneficiary],
    goal: &Goal,
    blended_base_rate: f64,
    modifiers: &ScenarioModifiers,
) -> Result<HashMap<u32, ProjectionResult>, PlanError> {
    goal.validate()?;
    validate_horizons(goal, beneficiaries)?;

    let rates = ScenarioRates::derive(blended_base_rate, modifiers);
    let mut results = HashMap::with_capacity(beneficiaries.len());

    for beneficiary in beneficiaries {
        let horizon = goal.horizon_years(beneficiary.current_age);
        let base_monthly = required_monthly_contribution(goal.target_amount, horizon, rates.base)?;
        let horizon_years = horizon as u32;

        debug!(
            "Beneficiary {}: {} years, required monthly contribution {:.2}",
            beneficiary.id, horizon_years, base_monthly
        );

        let scenario_projection = |scenario: Scenario| -> Result<ScenarioProjection, PlanError> {
            let annual_rate = rates.get(scenario);
            let trajectory = project_growth(base_monthly, horizon_years, annual_rate);
            if trajectory.iter().any(|p| !p.balance.is_finite()) {
                return Err(PlanError::DegenerateRate { annual_rate });
            }
            Ok(ScenarioProjection {
                scenario,
                annual_rate,
                monthly_contribution: base_monthly,
                trajectory,
            })
        };

        results.insert(
            beneficiary.id,
            ProjectionResult {
                beneficiary_id: beneficiary.id,
                horizon_years,
                required_monthly_contribution: base_monthly,
                base: scenario_projection(Scenario::Base)?,
                conservative: scenario_projection(Scenario::Conservative)?,
                optimistic: scenario_projection(Scenario::Optimistic)?,
            },
        );
    }

    Ok(results)
}

/// Projection engine bound to an asset catalog
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    catalog: AssetCatalog,
}

impl ProjectionEngine {
    pub fn new(catalog: AssetCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Blended base rate and derived scenario rates for a plan
    ///
    /// Does not check the allocation weights.
    pub fn scenario_rates(&self, plan: &Plan) -> ScenarioRates {
        let base = plan.allocation.blended_return(&self.catalog);
        ScenarioRates::derive(base, &plan.modifiers)
    }

    /// Validate the plan and project every beneficiary
    pub fn project(&self, plan: &Plan) -> Result<PlanProjection, PlanError> {
        plan.validate()?;

        let rates = self.scenario_rates(plan);
        info!(
            "Blended rates: base {:.4}%, conservative {:.4}%, optimistic {:.4}%",
            rates.base * 100.0,
            rates.conservative * 100.0,
            rates.optimistic * 100.0
        );

        let results = compute_all(
            plan.beneficiaries.as_slice(),
            &plan.goal,
            rates.base,
            &plan.modifiers,
        )?;

        Ok(PlanProjection { rates, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationEntry;
    use approx::assert_relative_eq;

    fn two_children() -> Vec<Beneficiary> {
        vec![Beneficiary::new(1, 5), Beneficiary::new(2, 3)]
    }

    #[test]
    fn test_reference_plan() {
        let engine = ProjectionEngine::default();
        let projection = engine.project(&Plan::default()).unwrap();

        assert_relative_eq!(projection.rates.base, 0.123085, epsilon = 1e-12);
        assert_relative_eq!(projection.rates.conservative, 0.123085 * 0.75, epsilon = 1e-12);
        assert_relative_eq!(projection.rates.optimistic, 0.123085 * 1.10, epsilon = 1e-12);

        let child1 = projection.get(1).unwrap();
        let child2 = projection.get(2).unwrap();
        assert_eq!(child1.horizon_years, 12);
        assert_eq!(child2.horizon_years, 14);
        assert_eq!(child1.base.trajectory.len(), 13);
        assert_eq!(child2.base.trajectory.len(), 15);

        // More time means a smaller monthly requirement
        assert!(child2.required_monthly_contribution < child1.required_monthly_contribution);

        for result in [child1, child2] {
            assert!((result.final_balance(Scenario::Base) - 75_000.0).abs() <= 1.0);
            assert!(result.shortfall(Scenario::Conservative, 75_000.0) > 0.0);
            assert!(result.shortfall(Scenario::Optimistic, 75_000.0) < 0.0);
        }
    }

    #[test]
    fn test_contribution_shared_across_scenarios() {
        let results = compute_all(&two_children(), &Goal::default(), 0.10, &ScenarioModifiers::default()).unwrap();

        for result in results.values() {
            for scenario in Scenario::ALL {
                assert_eq!(
                    result.scenario(scenario).monthly_contribution,
                    result.required_monthly_contribution
                );
            }
        }
    }

    #[test]
    fn test_scenario_ordering() {
        let results = compute_all(&two_children(), &Goal::default(), 0.09, &ScenarioModifiers::default()).unwrap();

        for result in results.values() {
            for year in 0..=result.horizon_years {
                let base = result.base.balance_at(year).unwrap();
                let conservative = result.conservative.balance_at(year).unwrap();
                let optimistic = result.optimistic.balance_at(year).unwrap();
                assert!(conservative <= base, "year {}", year);
                assert!(optimistic >= base, "year {}", year);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let a = compute_all(&two_children(), &Goal::default(), 0.123085, &ScenarioModifiers::default()).unwrap();
        let b = compute_all(&two_children(), &Goal::default(), 0.123085, &ScenarioModifiers::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_horizon_gives_no_partial_results() {
        let beneficiaries = vec![Beneficiary::new(1, 5), Beneficiary::new(2, 17)];
        let result = compute_all(&beneficiaries, &Goal::default(), 0.1, &ScenarioModifiers::default());

        assert!(matches!(
            result,
            Err(PlanError::BeneficiaryHorizon { beneficiary_id: 2, .. })
        ));
    }

    #[test]
    fn test_zero_base_rate() {
        let results = compute_all(
            &[Beneficiary::new(1, 7)],
            &Goal::new(60_000.0, 17),
            0.0,
            &ScenarioModifiers::default(),
        )
        .unwrap();

        let result = &results[&1];
        assert_eq!(result.required_monthly_contribution, 500.0);
        // Every scenario rate is zero as well
        assert_eq!(result.conservative.final_balance(), 60_000.0);
        assert_eq!(result.optimistic.final_balance(), 60_000.0);
    }

    #[test]
    fn test_negative_conservative_rate_passes_through() {
        let modifiers = ScenarioModifiers {
            conservative_percent: 200.0,
            optimistic_percent: 0.0,
        };
        let results = compute_all(&[Beneficiary::new(1, 10)], &Goal::default(), 0.08, &modifiers).unwrap();

        let result = &results[&1];
        assert_relative_eq!(result.conservative.annual_rate, -0.08, epsilon = 1e-15);
        assert!(result.conservative.final_balance() < result.total_contributed());
    }

    #[test]
    fn test_overflowing_scenario_rate_rejected() {
        let modifiers = ScenarioModifiers {
            conservative_percent: 25.0,
            optimistic_percent: 1.0e7,
        };
        let result = compute_all(&[Beneficiary::new(1, 3)], &Goal::default(), 0.12, &modifiers);

        match result {
            Err(PlanError::DegenerateRate { annual_rate }) => {
                assert_relative_eq!(annual_rate, 0.12 * (1.0 + 1.0e5), max_relative = 1e-12);
            }
            other => panic!("expected degenerate rate, got {:?}", other),
        }
    }

    #[test]
    fn test_allocation_must_sum_to_100() {
        let mut plan = Plan::default();
        plan.allocation.push(AllocationEntry::new("growth", 5.0)).unwrap();

        let engine = ProjectionEngine::default();
        assert!(matches!(engine.project(&plan), Err(PlanError::AllocationSum(_))));
    }

    #[test]
    fn test_invalid_goal() {
        let result = compute_all(&two_children(), &Goal::new(0.0, 17), 0.1, &ScenarioModifiers::default());
        assert!(matches!(result, Err(PlanError::InvalidGoal { .. })));
    }
}
