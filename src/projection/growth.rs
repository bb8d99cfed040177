//! Contribution solving and balance trajectories
//!
//! Contributions are made monthly at the end of each period and the account
//! compounds monthly at `annual_rate / 12` (ordinary annuity).

use crate::error::PlanError;
use serde::{Deserialize, Serialize};

/// Balance at the end of a projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: u32,
    pub balance: f64,
}

/// Future value of `months` end-of-month payments of 1 at `monthly_rate`
fn annuity_factor(months: f64, monthly_rate: f64) -> f64 {
    if monthly_rate == 0.0 {
        return months;
    }
    ((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate
}

/// Monthly contribution that grows to `target_amount` after `horizon_years`
///
/// Inverts the future value of an ordinary annuity:
/// `target * r / ((1 + r)^n - 1)` with `r = annual_rate / 12`, `n = years * 12`.
/// A zero rate falls back to `target / n`. Horizons of zero or less are
/// rejected, as is any rate for which the formula has no finite positive
/// solution.
pub fn required_monthly_contribution(
    target_amount: f64,
    horizon_years: i64,
    annual_rate: f64,
) -> Result<f64, PlanError> {
    if horizon_years <= 0 {
        return Err(PlanError::InvalidHorizon { horizon_years });
    }

    let months = (horizon_years * 12) as f64;
    let monthly_rate = annual_rate / 12.0;

    let contribution = target_amount / annuity_factor(months, monthly_rate);

    if !contribution.is_finite() || contribution <= 0.0 {
        return Err(PlanError::DegenerateRate { annual_rate });
    }
    Ok(contribution)
}

/// Balance after `years` of monthly contributions, rounded to whole currency
/// units (half away from zero)
pub fn balance_after_years(monthly_contribution: f64, years: u32, annual_rate: f64) -> f64 {
    if years == 0 {
        return 0.0;
    }
    let months_invested = f64::from(years) * 12.0;
    (monthly_contribution * annuity_factor(months_invested, annual_rate / 12.0)).round()
}

/// Year-by-year balance when contributing `monthly_contribution` every month
///
/// Returns `horizon_years + 1` points for years `0..=horizon_years`. Year 0
/// is always a zero balance.
pub fn project_growth(monthly_contribution: f64, horizon_years: u32, annual_rate: f64) -> Vec<TrajectoryPoint> {
    (0..=horizon_years)
        .map(|year| TrajectoryPoint {
            year,
            balance: balance_after_years(monthly_contribution, year, annual_rate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contribution_round_trip() {
        let rate = 0.123085;
        let monthly = required_monthly_contribution(75_000.0, 12, rate).unwrap();
        let trajectory = project_growth(monthly, 12, rate);

        let last = trajectory.last().unwrap();
        assert_eq!(last.year, 12);
        assert!((last.balance - 75_000.0).abs() <= 1.0, "final balance {}", last.balance);
    }

    #[test]
    fn test_contribution_matches_closed_form() {
        // 10 years at 6%: r = 0.005, n = 120
        let monthly = required_monthly_contribution(100_000.0, 10, 0.06).unwrap();
        let expected = 100_000.0 * 0.005 / (1.005_f64.powi(120) - 1.0);
        assert_relative_eq!(monthly, expected, max_relative = 1e-12);
        assert_relative_eq!(monthly, 610.2050, epsilon = 1e-3);
    }

    #[test]
    fn test_contribution_decreases_with_rate() {
        let rates = [0.01, 0.03, 0.05, 0.08, 0.12, 0.20];
        let contributions: Vec<f64> = rates
            .iter()
            .map(|&r| required_monthly_contribution(75_000.0, 12, r).unwrap())
            .collect();

        for pair in contributions.windows(2) {
            assert!(pair[1] < pair[0], "{:?}", contributions);
        }
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let monthly = required_monthly_contribution(72_000.0, 10, 0.0).unwrap();
        assert_eq!(monthly, 600.0);

        let trajectory = project_growth(monthly, 10, 0.0);
        assert_eq!(trajectory[1].balance, 7_200.0);
        assert_eq!(trajectory[10].balance, 72_000.0);
    }

    #[test]
    fn test_non_positive_horizon_rejected() {
        assert!(matches!(
            required_monthly_contribution(75_000.0, 0, 0.1),
            Err(PlanError::InvalidHorizon { horizon_years: 0 })
        ));
        assert!(matches!(
            required_monthly_contribution(75_000.0, -4, 0.1),
            Err(PlanError::InvalidHorizon { horizon_years: -4 })
        ));
    }

    #[test]
    fn test_singular_rate_rejected() {
        // Monthly rate of -200%: (1 + r)^n == 1 for an even number of months
        assert!(matches!(
            required_monthly_contribution(75_000.0, 1, -24.0),
            Err(PlanError::DegenerateRate { .. })
        ));
    }

    #[test]
    fn test_negative_rate_still_solves() {
        let monthly = required_monthly_contribution(12_000.0, 1, -0.05).unwrap();
        // Losing money each month means contributing more than the linear amount
        assert!(monthly > 1_000.0);
    }

    #[test]
    fn test_trajectory_shape() {
        for horizon in [0, 1, 5, 12, 40] {
            let trajectory = project_growth(250.0, horizon, 0.07);
            assert_eq!(trajectory.len(), horizon as usize + 1);
            assert_eq!(trajectory[0], TrajectoryPoint { year: 0, balance: 0.0 });

            for (i, point) in trajectory.iter().enumerate() {
                assert_eq!(point.year, i as u32);
                assert!(point.balance >= 0.0);
                assert_eq!(point.balance, point.balance.round());
            }
        }
    }

    #[test]
    fn test_first_year_balance() {
        // 12 payments of 100 at 12%/yr: 100 * (1.01^12 - 1) / 0.01 = 1268.25
        let trajectory = project_growth(100.0, 1, 0.12);
        assert_eq!(trajectory[1].balance, 1268.0);
    }

    #[test]
    fn test_balance_after_years_matches_trajectory() {
        let trajectory = project_growth(410.0, 18, 0.085);
        for point in &trajectory {
            assert_eq!(balance_after_years(410.0, point.year, 0.085), point.balance);
        }
        assert_eq!(balance_after_years(410.0, 0, 0.085), 0.0);
    }

    #[test]
    fn test_very_long_horizon_does_not_overflow_months() {
        // years * 12 would overflow u32; computed in f64 instead
        let balance = balance_after_years(1.0, u32::MAX, 0.0);
        assert_eq!(balance, f64::from(u32::MAX) * 12.0);
    }

    #[test]
    fn test_trajectory_is_pure() {
        let a = project_growth(321.5, 15, 0.0912);
        let b = project_growth(321.5, 15, 0.0912);
        assert_eq!(a, b);
    }
}
