//! Goal Projection - savings goal projection engine
//!
//! This library provides:
//! - Blending of named asset allocations into a single expected annual return
//! - Conservative / optimistic scenario rates derived from the blended return
//! - Required monthly contribution to reach a target amount by a target age
//! - Year-by-year balance trajectories per beneficiary and per scenario
//! - Plan loading (JSON) and asset catalog loading (CSV)

pub mod error;
pub mod catalog;
pub mod allocation;
pub mod plan;
pub mod scenario;
pub mod projection;
pub mod report;

// Re-export commonly used types
pub use error::{AllocationError, PlanError};
pub use catalog::{AssetCatalog, AssetOption};
pub use allocation::{Allocation, AllocationEntry, blend, is_fully_allocated};
pub use plan::{Beneficiaries, Beneficiary, Goal, Plan};
pub use scenario::{Scenario, ScenarioModifiers, ScenarioRates, derive_scenario_rate};
pub use projection::{ProjectionEngine, ProjectionResult, PlanProjection, TrajectoryPoint};
