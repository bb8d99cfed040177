//! Required monthly contribution across a grid of annual rates and horizons
//!
//! Supports JSON output via --json flag
//! Accepts config via environment variables:
//!   SWEEP_TARGET_AMOUNT, SWEEP_MIN_RATE, SWEEP_MAX_RATE, SWEEP_STEPS,
//!   SWEEP_HORIZONS (comma separated years)

use anyhow::{ensure, Context, Result};
use goal_projection::{
    projection::{balance_after_years, required_monthly_contribution},
    report::{format_currency, format_percent},
    PlanError,
};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::str::FromStr;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct SweepCell {
    annual_rate: f64,
    horizon_years: i64,
    monthly_contribution: Option<f64>,
    total_contributed: Option<f64>,
    growth_share: Option<f64>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct SweepResponse {
    target_amount: f64,
    rates: Vec<f64>,
    horizons: Vec<i64>,
    cells: Vec<SweepCell>,
    execution_time_ms: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", name, value)),
        Err(_) => Ok(default),
    }
}

fn parse_horizons(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(|s| -> Result<i64> {
            let horizon = s.trim().parse::<i64>().with_context(|| format!("Invalid horizon: {}", s))?;
            ensure!(
                horizon <= i64::from(u32::MAX),
                "Horizon {} exceeds {} years",
                horizon,
                u32::MAX
            );
            Ok(horizon)
        })
        .collect()
}

fn evaluate(target_amount: f64, annual_rate: f64, horizon_years: i64) -> SweepCell {
    let solved = required_monthly_contribution(target_amount, horizon_years, annual_rate).and_then(|monthly| {
        // Positive after the solve, bounded by parse_horizons
        let years = u32::try_from(horizon_years).map_err(|_| PlanError::InvalidHorizon { horizon_years })?;
        Ok((monthly, years))
    });

    match solved {
        Ok((monthly, years)) => {
            let total = monthly * f64::from(years) * 12.0;
            // Share of the final balance that comes from growth rather than deposits
            let final_balance = balance_after_years(monthly, years, annual_rate);
            let growth_share = if final_balance > 0.0 {
                Some(1.0 - total / final_balance)
            } else {
                None
            };
            SweepCell {
                annual_rate,
                horizon_years,
                monthly_contribution: Some(monthly),
                total_contributed: Some(total),
                growth_share,
                error: None,
            }
        }
        Err(e) => SweepCell {
            annual_rate,
            horizon_years,
            monthly_contribution: None,
            total_contributed: None,
            growth_share: None,
            error: Some(e.to_string()),
        },
    }
}


fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    let target_amount: f64 = env_or("SWEEP_TARGET_AMOUNT", 75_000.0)?;
    let min_rate: f64 = env_or("SWEEP_MIN_RATE", 0.0)?;
    let max_rate: f64 = env_or("SWEEP_MAX_RATE", 0.15)?;
    let steps: usize = env_or("SWEEP_STEPS", 7)?;
    let horizons = parse_horizons(&env::var("SWEEP_HORIZONS").unwrap_or_else(|_| "5,10,12,14,18".to_string()))?;

    ensure!(steps >= 2, "SWEEP_STEPS must be at least 2");
    ensure!(max_rate >= min_rate, "SWEEP_MAX_RATE must not be below SWEEP_MIN_RATE");

    let rates: Vec<f64> = (0..steps)
        .map(|i| min_rate + (max_rate - min_rate) * i as f64 / (steps - 1) as f64)
        .collect();

    let grid: Vec<(f64, i64)> = rates
        .iter()
        .flat_map(|&rate| horizons.iter().map(move |&h| (rate, h)))
        .collect();

    info!("Evaluating {} grid cells", grid.len());

    // Cells are independent; evaluate in parallel
    let cells: Vec<SweepCell> = grid
        .par_iter()
        .map(|&(rate, horizon)| evaluate(target_amount, rate, horizon))
        .collect();

    if json_output {
        let response = SweepResponse {
            target_amount,
            rates,
            horizons,
            cells,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Required monthly contribution for {}", format_currency(target_amount));
    print!("{:>10}", "Rate");
    for h in &horizons {
        print!(" {:>12}", format!("{} yrs", h));
    }
    println!();
    println!("{}", "-".repeat(10 + 13 * horizons.len()));

    for (row, rate) in cells.chunks(horizons.len()).zip(&rates) {
        print!("{:>10}", format_percent(*rate));
        for cell in row {
            let text = match cell.monthly_contribution {
                Some(monthly) => format_currency(monthly),
                None => "n/a".to_string(),
            };
            print!(" {:>12}", text);
        }
        println!();
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
