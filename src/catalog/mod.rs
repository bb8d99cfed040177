//! Static catalog of named asset options and their expected annual returns

pub mod loader;

pub use loader::{load_catalog, load_catalog_from_reader, load_default_catalog};

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named allocation option with its expected annual return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetOption {
    /// Unique identifier referenced by allocation entries
    pub key: String,

    /// Human readable name
    pub display_name: String,

    /// Expected annual return as a fraction (0.1293 = 12.93%)
    pub annual_return: f64,
}

impl AssetOption {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>, annual_return: f64) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            annual_return,
        }
    }
}

/// Immutable lookup table of asset options, keyed by `AssetOption::key`
///
/// Keeps the insertion order of the options for display.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    options: Vec<AssetOption>,
    index: HashMap<String, usize>,
}

impl AssetCatalog {
    /// Build a catalog, rejecting duplicate keys and non-finite returns
    pub fn new(options: Vec<AssetOption>) -> Result<Self, PlanError> {
        let mut index = HashMap::with_capacity(options.len());

        for (i, option) in options.iter().enumerate() {
            if option.key.trim().is_empty() {
                return Err(PlanError::InvalidAssetOption {
                    key: option.key.clone(),
                    reason: "key is empty".to_string(),
                });
            }
            if !option.annual_return.is_finite() {
                return Err(PlanError::InvalidAssetOption {
                    key: option.key.clone(),
                    reason: format!("annual return {} is not finite", option.annual_return),
                });
            }
            if index.insert(option.key.clone(), i).is_some() {
                return Err(PlanError::DuplicateAssetKey { key: option.key.clone() });
            }
        }

        Ok(Self { options, index })
    }

    /// Default three-portfolio catalog: growth, conservative growth and small cap
    pub fn reference() -> Self {
        let options = vec![
            AssetOption::new("growth", "Growth Portfolio", 0.1293),
            AssetOption::new("conservative_growth", "Conservative Growth", 0.0764),
            AssetOption::new("small_cap", "Small Cap", 0.1465),
        ];
        let index = options
            .iter()
            .enumerate()
            .map(|(i, o)| (o.key.clone(), i))
            .collect();
        Self { options, index }
    }

    /// Look up an option by key
    pub fn get(&self, key: &str) -> Option<&AssetOption> {
        self.index.get(key).map(|&i| &self.options[i])
    }

    /// Annual return for a key, `None` when the key is not in the catalog
    pub fn annual_return(&self, key: &str) -> Option<f64> {
        self.get(key).map(|o| o.annual_return)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::reference()
    }
}
