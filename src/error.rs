//! Error types for plan validation and projection

use thiserror::Error;

/// Message shown while the allocation weights do not add up to 100%
pub const ALLOCATION_SUM_MESSAGE: &str = "Portfolio allocations must sum to 100%";

/// Allocation weights do not sum to exactly 100
///
/// Derived from the allocation list, never stored on its own. The display
/// text is fixed so it can be surfaced to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Portfolio allocations must sum to 100%")]
pub struct AllocationError {
    /// Sum of the weights at the time of validation
    pub total: f64,
}

/// Errors raised while building, validating or projecting a plan
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    AllocationSum(#[from] AllocationError),

    #[error("allocation weight {weight} is outside [0, 100]")]
    InvalidWeight { weight: f64 },

    #[error("no allocation entry at index {index}")]
    UnknownAllocationEntry { index: usize },

    #[error("horizon of {horizon_years} years is not positive")]
    InvalidHorizon { horizon_years: i64 },

    #[error("beneficiary {beneficiary_id}: target age {target_age} must be greater than current age {current_age}")]
    BeneficiaryHorizon {
        beneficiary_id: u32,
        current_age: u32,
        target_age: u32,
    },

    #[error("annual rate {annual_rate} makes the contribution formula singular")]
    DegenerateRate { annual_rate: f64 },

    #[error("target amount must be positive, got {target_amount}")]
    InvalidGoal { target_amount: f64 },

    #[error("cannot remove the last beneficiary")]
    LastBeneficiary,

    #[error("a plan needs at least one beneficiary")]
    NoBeneficiaries,

    #[error("no beneficiary id left above {max_id}")]
    BeneficiaryIdsExhausted { max_id: u32 },

    #[error("unknown beneficiary {id}")]
    UnknownBeneficiary { id: u32 },

    #[error("duplicate beneficiary id {id}")]
    DuplicateBeneficiary { id: u32 },

    #[error("beneficiary {id} needs either current_age or birth_date")]
    MissingAge { id: u32 },

    #[error("birth date {birth_date} is after {as_of}")]
    BirthDateInFuture {
        birth_date: chrono::NaiveDate,
        as_of: chrono::NaiveDate,
    },

    #[error("duplicate asset key '{key}' in catalog")]
    DuplicateAssetKey { key: String },

    #[error("invalid asset option '{key}': {reason}")]
    InvalidAssetOption { key: String, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
