//! Return scenarios derived from the blended base rate
//!
//! The conservative scenario applies a haircut to the base rate and the
//! optimistic scenario an uplift. Rates are not clamped: a haircut above 100%
//! produces a negative rate, which is passed on to the projection unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three projected scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Base,
    Conservative,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Base, Scenario::Conservative, Scenario::Optimistic];

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Base => "Base Case",
            Scenario::Conservative => "Conservative",
            Scenario::Optimistic => "Optimistic",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percent adjustments applied to the base rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioModifiers {
    /// Haircut for the conservative scenario, in percent of the base rate
    pub conservative_percent: f64,

    /// Uplift for the optimistic scenario, in percent of the base rate
    pub optimistic_percent: f64,
}

impl Default for ScenarioModifiers {
    /// 25% haircut and 10% uplift (base rate x 0.75 and x 1.10)
    fn default() -> Self {
        Self {
            conservative_percent: 25.0,
            optimistic_percent: 10.0,
        }
    }
}

/// Effective annual rate for a scenario
pub fn derive_scenario_rate(base_rate: f64, kind: Scenario, modifiers: &ScenarioModifiers) -> f64 {
    match kind {
        Scenario::Base => base_rate,
        Scenario::Conservative => base_rate * (1.0 - modifiers.conservative_percent / 100.0),
        Scenario::Optimistic => base_rate * (1.0 + modifiers.optimistic_percent / 100.0),
    }
}

/// Annual rates for all three scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRates {
    pub base: f64,
    pub conservative: f64,
    pub optimistic: f64,
}

impl ScenarioRates {
    pub fn derive(base_rate: f64, modifiers: &ScenarioModifiers) -> Self {
        Self {
            base: base_rate,
            conservative: derive_scenario_rate(base_rate, Scenario::Conservative, modifiers),
            optimistic: derive_scenario_rate(base_rate, Scenario::Optimistic, modifiers),
        }
    }

    pub fn get(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Base => self.base,
            Scenario::Conservative => self.conservative,
            Scenario::Optimistic => self.optimistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_modifiers_match_multipliers() {
        let rates = ScenarioRates::derive(0.12, &ScenarioModifiers::default());

        assert_eq!(rates.base, 0.12);
        assert_relative_eq!(rates.conservative, 0.12 * 0.75, epsilon = 1e-15);
        assert_relative_eq!(rates.optimistic, 0.12 * 1.10, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_modifiers_leave_rate_unchanged() {
        let modifiers = ScenarioModifiers {
            conservative_percent: 0.0,
            optimistic_percent: 0.0,
        };
        for kind in Scenario::ALL {
            assert_eq!(derive_scenario_rate(0.08, kind, &modifiers), 0.08);
        }
    }

    #[test]
    fn test_haircut_above_100_goes_negative() {
        let modifiers = ScenarioModifiers {
            conservative_percent: 150.0,
            optimistic_percent: 0.0,
        };
        let rate = derive_scenario_rate(0.10, Scenario::Conservative, &modifiers);
        assert_relative_eq!(rate, -0.05, epsilon = 1e-15);
    }

    #[test]
    fn test_rates_lookup() {
        let rates = ScenarioRates::derive(0.10, &ScenarioModifiers::default());
        for kind in Scenario::ALL {
            assert_eq!(rates.get(kind), derive_scenario_rate(0.10, kind, &ScenarioModifiers::default()));
        }
    }

    #[test]
    fn test_modifiers_deserialize_with_defaults() {
        let modifiers: ScenarioModifiers = serde_json::from_str(r#"{"optimistic_percent": 20}"#).unwrap();
        assert_eq!(modifiers.conservative_percent, 25.0);
        assert_eq!(modifiers.optimistic_percent, 20.0);
    }
}
