//! Rate-table loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading per-tax-year
//! rate tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::RateTable;

/// Loads and provides access to the rate tables for every supported tax year.
///
/// The `ConfigLoader` reads every `*.yaml` file in a directory, validates
/// each table against the structural invariants, and keeps the result
/// immutable for the lifetime of the process.
///
/// # Directory Structure
///
/// ```text
/// config/uk_paye/
/// ├── 2024_25.yaml   # one rate table per tax year
/// └── 2025_26.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use paye_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/uk_paye").unwrap();
///
/// let table = loader.table("2025/26").unwrap();
/// println!("Personal allowance: £{}", table.income_tax.personal_allowance);
///
/// for year in loader.supported_tax_years() {
///     println!("supported: {}", year);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Tables sorted by start date (oldest first).
    tables: Vec<RateTable>,
}

impl ConfigLoader {
    /// Loads every rate table from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/uk_paye")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The directory is missing or contains no YAML files
    /// - Any file contains invalid YAML
    /// - Any table violates a structural invariant (`MalformedRateTable`)
    /// - Two files declare the same tax-year label
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tables: Vec<RateTable> = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let file_path = entry.path();
            if file_path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml(&file_path)?;
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate tables found)", dir_str),
            });
        }

        for table in &tables {
            table.validate()?;
        }

        tables.sort_by(|a, b| a.starts_on.cmp(&b.starts_on));

        let mut seen = std::collections::HashSet::new();
        for table in &tables {
            if !seen.insert(table.tax_year.as_str()) {
                return Err(EngineError::MalformedRateTable {
                    tax_year: table.tax_year.clone(),
                    message: "duplicate tax-year label across configuration files".to_string(),
                });
            }
        }

        Ok(Self { tables })
    }

    /// Loads and parses one YAML rate-table file.
    fn load_yaml(path: &Path) -> EngineResult<RateTable> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets the rate table for a tax-year label.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paye_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/uk_paye")?;
    /// let table = loader.table("2025/26")?;
    /// # Ok::<(), paye_engine::error::EngineError>(())
    /// ```
    pub fn table(&self, tax_year: &str) -> EngineResult<&RateTable> {
        self.tables
            .iter()
            .find(|t| t.tax_year == tax_year)
            .ok_or_else(|| EngineError::UnknownTaxYear {
                tax_year: tax_year.to_string(),
            })
    }

    /// Gets the rate table in effect on a calendar date.
    ///
    /// The most recent table starting on or before the date applies, so the
    /// latest year's rates remain in effect until superseded.
    pub fn table_for_date(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.tables
            .iter()
            .rev()
            .find(|t| t.starts_on <= date)
            .ok_or_else(|| EngineError::UnknownTaxYear {
                tax_year: format!("no tax year in effect on {}", date),
            })
    }

    /// The labels of every supported tax year, oldest first.
    pub fn supported_tax_years(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.tax_year.clone()).collect()
    }
}
