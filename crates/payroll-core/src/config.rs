//! Import configuration: row cap and department lookup tables

use crate::departments::DepartmentMap;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of data rows read from each export
pub const DEFAULT_MAX_DATA_ROWS: usize = 5000;

/// Settings shared by both record builders
///
/// The defaults reproduce the fixed tables. A JSON file can swap in
/// different tables without touching code; missing keys keep defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Data rows read per file; later rows are ignored
    pub max_data_rows: usize,
    /// Labor export job code -> department
    pub job_codes: DepartmentMap,
    /// Tips export job title -> department
    pub job_titles: DepartmentMap,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_data_rows: DEFAULT_MAX_DATA_ROWS,
            job_codes: DepartmentMap::labor_job_codes(),
            job_titles: DepartmentMap::tips_job_titles(),
        }
    }
}

impl ImportConfig {
    /// Load a config file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
