//! Projection output structures

use super::growth::TrajectoryPoint;
use crate::scenario::{Scenario, ScenarioRates};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trajectory for one beneficiary under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: Scenario,

    /// Effective annual rate of the scenario
    pub annual_rate: f64,

    /// Monthly contribution used (always the base-case requirement)
    pub monthly_contribution: f64,

    /// Balance per year, starting at year 0
    pub trajectory: Vec<TrajectoryPoint>,
}

impl ScenarioProjection {
    /// Balance at the end of the horizon
    pub fn final_balance(&self) -> f64 {
        self.trajectory.last().map(|p| p.balance).unwrap_or(0.0)
    }

    /// Balance at a given year, if within the horizon
    pub fn balance_at(&self, year: u32) -> Option<f64> {
        self.trajectory.get(year as usize).map(|p| p.balance)
    }
}

/// Projection for one beneficiary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub beneficiary_id: u32,

    /// Years between the beneficiary's age and the target age
    pub horizon_years: u32,

    /// Monthly contribution that reaches the target under the base rate
    pub required_monthly_contribution: f64,

    pub base: ScenarioProjection,
    pub conservative: ScenarioProjection,
    pub optimistic: ScenarioProjection,
}

impl ProjectionResult {
    pub fn scenario(&self, scenario: Scenario) -> &ScenarioProjection {
        match scenario {
            Scenario::Base => &self.base,
            Scenario::Conservative => &self.conservative,
            Scenario::Optimistic => &self.optimistic,
        }
    }

    pub fn final_balance(&self, scenario: Scenario) -> f64 {
        self.scenario(scenario).final_balance()
    }

    /// Amount by which a scenario misses the target (negative when it overshoots)
    pub fn shortfall(&self, scenario: Scenario, target_amount: f64) -> f64 {
        target_amount - self.final_balance(scenario)
    }

    /// Total paid in over the horizon
    pub fn total_contributed(&self) -> f64 {
        self.required_monthly_contribution * f64::from(self.horizon_years) * 12.0
    }
}

/// Full output of a plan projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProjection {
    /// Blended base rate and the derived scenario rates
    pub rates: ScenarioRates,

    /// Results keyed by beneficiary id
    pub results: HashMap<u32, ProjectionResult>,
}

impl PlanProjection {
    pub fn get(&self, beneficiary_id: u32) -> Option<&ProjectionResult> {
        self.results.get(&beneficiary_id)
    }

    /// Results ordered by beneficiary id, for stable output
    pub fn sorted(&self) -> Vec<&ProjectionResult> {
        let mut results: Vec<_> = self.results.values().collect();
        results.sort_by_key(|r| r.beneficiary_id);
        results
    }
}
