//! Text and CSV output for plan projections

use crate::catalog::AssetCatalog;
use crate::error::PlanError;
use crate::plan::Plan;
use crate::projection::PlanProjection;
use crate::scenario::Scenario;
use serde::Serialize;
use std::fmt::{self, Write as _};

/// Format as whole US dollars with thousands separators, e.g. `$75,000`
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a fractional rate as a percentage with two decimals, e.g. `12.31%`
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Investment summary: per-beneficiary requirement and final balances, then allocation and rates
pub fn render_summary(
    plan: &Plan,
    projection: &PlanProjection,
    catalog: &AssetCatalog,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "Investment Summary")?;
    writeln!(out, "==================")?;
    writeln!(
        out,
        "Target: {} by age {}",
        format_currency(plan.goal.target_amount),
        plan.goal.target_age
    )?;

    for result in projection.sorted() {
        let age = plan
            .beneficiaries
            .get(result.beneficiary_id)
            .map(|b| b.current_age)
            .unwrap_or_default();

        writeln!(out)?;
        writeln!(out, "Beneficiary {} (Age {})", result.beneficiary_id, age)?;
        writeln!(out, "  Investment Period: {} years", result.horizon_years)?;
        writeln!(
            out,
            "  Required Monthly Investment: {}",
            format_currency(result.required_monthly_contribution)
        )?;
        for scenario in Scenario::ALL {
            writeln!(
                out,
                "  Final Balance ({}): {}",
                scenario,
                format_currency(result.final_balance(scenario))
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Allocation")?;
    for entry in plan.allocation.entries() {
        let name = entry
            .asset_key
            .as_deref()
            .map(|key| catalog.get(key).map(|o| o.display_name.as_str()).unwrap_or(key))
            .unwrap_or("(unset)");
        writeln!(out, "  {}: {}%", name, entry.weight_percent)?;
    }

    writeln!(out)?;
    writeln!(out, "Return Scenarios")?;
    for scenario in Scenario::ALL {
        writeln!(
            out,
            "  {} Return: {}",
            scenario,
            format_percent(projection.rates.get(scenario))
        )?;
    }

    Ok(out)
}

/// One CSV line: all three scenario balances for a beneficiary and year
#[derive(Debug, Serialize)]
struct TrajectoryRecord {
    beneficiary_id: u32,
    year: u32,
    base: f64,
    conservative: f64,
    optimistic: f64,
}

/// Write every trajectory as CSV, ordered by beneficiary then year
pub fn write_trajectories_csv<W: std::io::Write>(writer: W, projection: &PlanProjection) -> Result<(), PlanError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for result in projection.sorted() {
        for point in &result.base.trajectory {
            csv_writer.serialize(TrajectoryRecord {
                beneficiary_id: result.beneficiary_id,
                year: point.year,
                base: point.balance,
                conservative: result.conservative.balance_at(point.year).unwrap_or(0.0),
                optimistic: result.optimistic.balance_at(point.year).unwrap_or(0.0),
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
