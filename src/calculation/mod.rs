//! Calculation logic for the PAYE engine.
//!
//! This module contains the individual calculators (personal-allowance
//! taper, progressive band walk, pension adjustment, student-loan
//! repayments) and the pipeline that sequences them into one deterministic
//! calculation with a measured marginal rate.

mod allowance;
mod banded;
mod engine;
mod pension;
mod student_loans;

pub use allowance::{AllowanceResult, resolve_allowance};
pub use banded::{BandedDeduction, apply_bands};
pub use engine::{
    MARGINAL_RATE_PROBE_DELTA, NOTE_ALLOWANCE_TAPER, NOTE_LOAN_STACKING, NOTE_SECONDARY_INCOME,
    PensionModeComparison, calculate, calculate_with_table, compare_pension_modes,
};
pub use pension::{PensionAdjustment, adjust_for_pension};
pub use student_loans::repayments_for;
