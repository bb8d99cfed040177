//! CSV-based asset catalog loader
//!
//! Expected columns: `key,display_name,annual_return`

use super::{AssetCatalog, AssetOption};
use crate::error::PlanError;
use csv::Reader;
use log::info;
use std::path::Path;

/// Default path to the shipped catalog
pub const DEFAULT_CATALOG_PATH: &str = "data/asset_options.csv";

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    key: String,
    display_name: String,
    annual_return: f64,
}

impl CsvRow {
    fn to_option(self) -> AssetOption {
        AssetOption {
            key: self.key.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
            annual_return: self.annual_return,
        }
    }
}

/// Load a catalog from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<AssetCatalog, PlanError> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)?;
    let catalog = read_options(reader)?;
    info!("Loaded {} asset options from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a catalog from any reader (e.g., string buffer)
pub fn load_catalog_from_reader<R: std::io::Read>(reader: R) -> Result<AssetCatalog, PlanError> {
    read_options(Reader::from_reader(reader))
}

/// Load the catalog from the default data/asset_options.csv location
pub fn load_default_catalog() -> Result<AssetCatalog, PlanError> {
    load_catalog(DEFAULT_CATALOG_PATH)
}

fn read_options<R: std::io::Read>(mut reader: Reader<R>) -> Result<AssetCatalog, PlanError> {
    let mut options = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        options.push(row.to_option());
    }

    AssetCatalog::new(options)
}
