//! Core data models for the PAYE calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod request;

pub use breakdown::{BandLine, CalculationNote, LoanRepaymentLine, TaxBreakdown};
pub use request::{CalculationRequest, PensionContribution, PensionMode, StudentLoanPlan};
