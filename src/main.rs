//! Goal Projection CLI
//!
//! Loads a plan (or uses the reference plan), projects every beneficiary and
//! prints the investment summary.

use anyhow::{bail, Context, Result};
use clap::Parser;
use goal_projection::{
    catalog::{load_catalog, AssetCatalog},
    plan::load_plan,
    report::{render_summary, write_trajectories_csv},
    Plan, ProjectionEngine,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "goal_projection", version, about = "Project savings towards a goal under three return scenarios")]
struct Args {
    /// Plan file (JSON); the reference plan is used when omitted
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Asset catalog (CSV with key,display_name,annual_return)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Write per-year trajectories to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the projection as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Override the goal's target amount
    #[arg(long)]
    target_amount: Option<f64>,

    /// Override the goal's target age
    #[arg(long)]
    target_age: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => AssetCatalog::reference(),
    };

    let mut plan = match &args.plan {
        Some(path) => load_plan(path)
            .with_context(|| format!("Failed to load plan {}", path.display()))?,
        None => Plan::default(),
    };
    if let Some(amount) = args.target_amount {
        plan.goal.target_amount = amount;
    }
    if let Some(age) = args.target_age {
        plan.goal.target_age = age;
    }

    if let Some(err) = plan.allocation.error() {
        bail!("{} (currently {}%)", err, err.total);
    }

    let engine = ProjectionEngine::new(catalog);
    let projection = engine.project(&plan).context("Projection failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        print!("{}", render_summary(&plan, &projection, engine.catalog())?);
    }

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        write_trajectories_csv(file, &projection)?;
        if !args.json {
            println!("\nTrajectories written to: {}", path.display());
        }
    }

    Ok(())
}
