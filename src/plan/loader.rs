//! Load plans from JSON files
//!
//! Every section is optional and falls back to the reference plan (a
//! $75,000 target at age 17 for two children aged 5 and 3).

use super::{Beneficiaries, Beneficiary, Goal, Plan};
use crate::allocation::{Allocation, AllocationEntry};
use crate::error::PlanError;
use crate::scenario::ScenarioModifiers;
use chrono::{Local, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Beneficiary as written in a plan file: either an age or a birth date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeneficiaryRow {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl BeneficiaryRow {
    fn to_beneficiary(&self, as_of: NaiveDate) -> Result<Beneficiary, PlanError> {
        match (self.current_age, self.birth_date) {
            (Some(age), _) => Ok(Beneficiary::new(self.id, age)),
            (None, Some(birth_date)) => Beneficiary::from_birth_date(self.id, birth_date, as_of),
            (None, None) => Err(PlanError::MissingAge { id: self.id }),
        }
    }
}

/// On-disk plan layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(default)]
    pub goal: Goal,

    #[serde(default)]
    pub allocation: Option<Vec<AllocationEntry>>,

    #[serde(default)]
    pub beneficiaries: Option<Vec<BeneficiaryRow>>,

    #[serde(default)]
    pub modifiers: ScenarioModifiers,

    /// Date used to turn birth dates into ages (defaults to today)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl PlanFile {
    /// Build a plan, resolving birth dates against `as_of` or today
    pub fn into_plan(self) -> Result<Plan, PlanError> {
        let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());

        let allocation = match self.allocation {
            Some(entries) => Allocation::new(entries)?,
            None => Allocation::reference(),
        };

        let beneficiaries = match self.beneficiaries {
            Some(rows) => {
                let list = rows
                    .iter()
                    .map(|row| row.to_beneficiary(as_of))
                    .collect::<Result<Vec<_>, _>>()?;
                Beneficiaries::new(list)?
            }
            None => Beneficiaries::reference(),
        };

        Ok(Plan::new(self.goal, allocation, beneficiaries, self.modifiers))
    }
}

/// Load a plan from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Plan, PlanError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let plan = load_plan_from_reader(BufReader::new(file))?;
    info!(
        "Loaded plan from {}: {} beneficiaries, {} allocation entries",
        path.display(),
        plan.beneficiaries.len(),
        plan.allocation.entries().len()
    );
    Ok(plan)
}

/// Load a plan from any reader
pub fn load_plan_from_reader<R: std::io::Read>(reader: R) -> Result<Plan, PlanError> {
    let file: PlanFile = serde_json::from_reader(reader)?;
    file.into_plan()
}
