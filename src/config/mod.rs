//! Rate-table configuration for the PAYE calculation engine.
//!
//! Tables are loaded from a directory of YAML files, one per tax year, and
//! validated once at load time. See [`ConfigLoader`] for the directory
//! layout.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Band, IncomeTaxConfig, LoanPlanRates, NationalInsuranceConfig, RateTable};
