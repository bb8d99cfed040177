//! Asset allocation: validation of the weights and blending into one annual return

use crate::catalog::AssetCatalog;
use crate::error::{AllocationError, PlanError};
use log::debug;
use serde::{Deserialize, Serialize};

/// One line of the allocation: an asset key and its share in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    /// Catalog key, `None` while the selection is unset
    #[serde(default)]
    pub asset_key: Option<String>,

    /// Share of the contribution in percent (0-100)
    pub weight_percent: f64,
}

impl AllocationEntry {
    pub fn new(asset_key: impl Into<String>, weight_percent: f64) -> Self {
        Self {
            asset_key: Some(asset_key.into()),
            weight_percent,
        }
    }

    /// Entry with no asset selected yet
    pub fn unset(weight_percent: f64) -> Self {
        Self {
            asset_key: None,
            weight_percent,
        }
    }
}

/// Sum of all weights in percent
pub fn total_weight(entries: &[AllocationEntry]) -> f64 {
    entries.iter().map(|e| e.weight_percent).sum()
}

/// Whether the weights sum to exactly 100
///
/// Exact floating point equality: 99.999 and 100.001 both fail. Every caller
/// goes through this predicate so a tolerance can be introduced in one place.
pub fn is_fully_allocated(entries: &[AllocationEntry]) -> bool {
    total_weight(entries) == 100.0
}

/// Validate the allocation weights
pub fn validate_allocation(entries: &[AllocationEntry]) -> Result<(), AllocationError> {
    if is_fully_allocated(entries) {
        Ok(())
    } else {
        Err(AllocationError { total: total_weight(entries) })
    }
}

/// Annual return of the asset an entry points at, if it resolves
pub fn resolve_return(entry: &AllocationEntry, catalog: &AssetCatalog) -> Option<f64> {
    entry
        .asset_key
        .as_deref()
        .and_then(|key| catalog.annual_return(key))
}

/// Blend the entries into one annual return
///
/// Weighted sum of the catalog returns. Entries that are unset or reference a
/// key missing from the catalog contribute a return of zero. The weights are
/// not re-validated here; callers check `is_fully_allocated` first.
pub fn blend(entries: &[AllocationEntry], catalog: &AssetCatalog) -> f64 {
    entries
        .iter()
        .map(|entry| {
            let annual_return = resolve_return(entry, catalog).unwrap_or_else(|| {
                debug!(
                    "Asset key {:?} not in catalog, counted as zero return",
                    entry.asset_key
                );
                0.0
            });
            annual_return * (entry.weight_percent / 100.0)
        })
        .sum()
}

/// Caller-owned allocation list with its derived validation state
///
/// The validation error is recomputed after every mutation, so `error()`
/// always reflects the current weights.
#[derive(Debug, Clone)]
pub struct Allocation {
    entries: Vec<AllocationEntry>,
    error: Option<AllocationError>,
}

impl Allocation {
    pub fn new(entries: Vec<AllocationEntry>) -> Result<Self, PlanError> {
        for entry in &entries {
            check_weight(entry.weight_percent)?;
        }
        let mut allocation = Self { entries, error: None };
        allocation.revalidate();
        Ok(allocation)
    }

    /// Default allocation: 75% growth, 15% conservative growth, 10% small cap
    pub fn reference() -> Self {
        let entries = vec![
            AllocationEntry::new("growth", 75.0),
            AllocationEntry::new("conservative_growth", 15.0),
            AllocationEntry::new("small_cap", 10.0),
        ];
        Self { entries, error: None }
    }

    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    /// Current validation error, `None` when the weights sum to 100
    pub fn error(&self) -> Option<&AllocationError> {
        self.error.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn total(&self) -> f64 {
        total_weight(&self.entries)
    }

    /// Blend against a catalog
    pub fn blended_return(&self, catalog: &AssetCatalog) -> f64 {
        blend(&self.entries, catalog)
    }

    pub fn set_weight(&mut self, index: usize, weight_percent: f64) -> Result<(), PlanError> {
        check_weight(weight_percent)?;
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(PlanError::UnknownAllocationEntry { index })?;
        entry.weight_percent = weight_percent;
        self.revalidate();
        Ok(())
    }

    pub fn set_asset(&mut self, index: usize, asset_key: Option<String>) -> Result<(), PlanError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(PlanError::UnknownAllocationEntry { index })?;
        entry.asset_key = asset_key;
        self.revalidate();
        Ok(())
    }

    pub fn push(&mut self, entry: AllocationEntry) -> Result<(), PlanError> {
        check_weight(entry.weight_percent)?;
        self.entries.push(entry);
        self.revalidate();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<AllocationEntry, PlanError> {
        if index >= self.entries.len() {
            return Err(PlanError::UnknownAllocationEntry { index });
        }
        let removed = self.entries.remove(index);
        self.revalidate();
        Ok(removed)
    }

    fn revalidate(&mut self) {
        self.error = validate_allocation(&self.entries).err();
    }
}

impl Default for Allocation {
    fn default() -> Self {
        Self::reference()
    }
}

fn check_weight(weight_percent: f64) -> Result<(), PlanError> {
    if (0.0..=100.0).contains(&weight_percent) {
        Ok(())
    } else {
        Err(PlanError::InvalidWeight { weight: weight_percent })
    }
}
