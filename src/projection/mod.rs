//! Growth projection: required contributions and scenario trajectories

mod engine;
mod growth;
mod results;

pub use engine::{compute_all, ProjectionEngine};
pub use growth::{balance_after_years, project_growth, required_monthly_contribution, TrajectoryPoint};
pub use results::{PlanProjection, ProjectionResult, ScenarioProjection};
