//! Goal and beneficiary data structures

use crate::error::PlanError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Savings target shared by all beneficiaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    /// Amount to accumulate by the target age
    pub target_amount: f64,

    /// Age at which every beneficiary should reach the target amount
    pub target_age: u32,
}

impl Goal {
    pub fn new(target_amount: f64, target_age: u32) -> Self {
        Self { target_amount, target_age }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.target_amount.is_finite() && self.target_amount > 0.0 {
            Ok(())
        } else {
            Err(PlanError::InvalidGoal { target_amount: self.target_amount })
        }
    }

    /// Years between `current_age` and the target age (may be zero or negative)
    pub fn horizon_years(&self, current_age: u32) -> i64 {
        i64::from(self.target_age) - i64::from(current_age)
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self {
            target_amount: 75_000.0,
            target_age: 17,
        }
    }
}

/// A person saved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub id: u32,
    pub current_age: u32,
}

impl Beneficiary {
    pub fn new(id: u32, current_age: u32) -> Self {
        Self { id, current_age }
    }

    /// Beneficiary whose age is the number of completed years between
    /// `birth_date` and `as_of`
    pub fn from_birth_date(id: u32, birth_date: NaiveDate, as_of: NaiveDate) -> Result<Self, PlanError> {
        if birth_date > as_of {
            return Err(PlanError::BirthDateInFuture { birth_date, as_of });
        }

        let mut years = as_of.year() - birth_date.year();
        if (as_of.month(), as_of.day()) < (birth_date.month(), birth_date.day()) {
            years -= 1;
        }

        Ok(Self {
            id,
            current_age: years as u32,
        })
    }
}

/// Beneficiary list with unique ids that is never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beneficiaries {
    entries: Vec<Beneficiary>,
}

impl Beneficiaries {
    pub fn new(entries: Vec<Beneficiary>) -> Result<Self, PlanError> {
        if entries.is_empty() {
            return Err(PlanError::NoBeneficiaries);
        }
        for (i, b) in entries.iter().enumerate() {
            if entries[..i].iter().any(|other| other.id == b.id) {
                return Err(PlanError::DuplicateBeneficiary { id: b.id });
            }
        }
        Ok(Self { entries })
    }

    /// Two children aged 5 and 3
    pub fn reference() -> Self {
        Self {
            entries: vec![Beneficiary::new(1, 5), Beneficiary::new(2, 3)],
        }
    }

    /// Add a beneficiary with the id after the highest one in use, returning that id
    pub fn add(&mut self, current_age: u32) -> Result<u32, PlanError> {
        let max_id = self.entries.iter().map(|b| b.id).max().unwrap_or(0);
        let id = max_id
            .checked_add(1)
            .ok_or(PlanError::BeneficiaryIdsExhausted { max_id })?;
        self.entries.push(Beneficiary::new(id, current_age));
        Ok(id)
    }

    /// Remove a beneficiary; the last remaining one cannot be removed
    pub fn remove(&mut self, id: u32) -> Result<Beneficiary, PlanError> {
        let pos = self
            .entries
            .iter()
            .position(|b| b.id == id)
            .ok_or(PlanError::UnknownBeneficiary { id })?;
        if self.entries.len() == 1 {
            return Err(PlanError::LastBeneficiary);
        }
        Ok(self.entries.remove(pos))
    }

    pub fn set_age(&mut self, id: u32, current_age: u32) -> Result<(), PlanError> {
        let beneficiary = self
            .entries
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(PlanError::UnknownBeneficiary { id })?;
        beneficiary.current_age = current_age;
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&Beneficiary> {
        self.entries.iter().find(|b| b.id == id)
    }

    pub fn as_slice(&self) -> &[Beneficiary] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Beneficiary> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Beneficiaries {
    fn default() -> Self {
        Self::reference()
    }
}
