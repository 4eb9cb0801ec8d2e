//! Calculation result models for the PAYE calculation engine.
//!
//! This module contains the [`TaxBreakdown`] type and its associated
//! structures that capture all outputs from a calculation: per-band lines for
//! income tax and National Insurance, per-plan loan repayments, totals, and
//! advisory notes.
//!
//! A breakdown is a pure value: identical requests produce identical
//! breakdowns, so it carries no identifiers or timestamps.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::StudentLoanPlan;

/// The slice of a deduction falling in one progressive band.
///
/// # Example
///
/// ```
/// use paye_engine::models::BandLine;
/// use rust_decimal_macros::dec;
///
/// let line = BandLine {
///     band: "basic".to_string(),
///     taxable: dec!(37700),
///     rate: dec!(0.20),
///     amount: dec!(7540.00),
/// };
/// assert_eq!(line.amount, line.taxable * line.rate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandLine {
    /// The band name from the rate table (e.g. "basic", "higher").
    pub band: String,
    /// The amount of income falling inside this band.
    pub taxable: Decimal,
    /// The band's rate as a fraction (e.g. 0.20).
    pub rate: Decimal,
    /// The deduction for this band, rounded to the penny.
    pub amount: Decimal,
}

/// The annual repayment under one student-loan plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRepaymentLine {
    /// The repayment plan.
    pub plan: StudentLoanPlan,
    /// The plan's annual repayment threshold.
    pub threshold: Decimal,
    /// The repayment rate above the threshold, as a fraction.
    pub rate: Decimal,
    /// The annual repayment, rounded down to the penny. Zero when income is
    /// at or below the threshold.
    pub amount: Decimal,
}

/// A human-readable note attached to a calculation.
///
/// Notes flag well-known trap ranges (the allowance taper, stacked loans)
/// and never alter the numeric result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationNote {
    /// A stable code identifying the kind of note.
    pub code: String,
    /// The human-readable message.
    pub message: String,
}

/// The complete result of a PAYE calculation.
///
/// All monetary fields are annual and penny-precise; the two rate fields are
/// percentages rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// The tax year the calculation ran under.
    pub tax_year: String,
    /// Gross income (salary plus bonus) before any adjustment.
    pub gross_income: Decimal,
    /// The personal allowance actually applied, after any taper.
    pub personal_allowance: Decimal,
    /// Income subject to income tax, after pension adjustment and allowance.
    pub taxable_income: Decimal,
    /// Per-band income-tax breakdown.
    pub income_tax_bands: Vec<BandLine>,
    /// Total income tax (sum of the band lines).
    pub total_income_tax: Decimal,
    /// Per-band National Insurance breakdown.
    pub ni_bands: Vec<BandLine>,
    /// Total Class 1 National Insurance contributions.
    pub ni_contributions: Decimal,
    /// Per-plan student-loan repayments, one line per selected plan.
    pub student_loans: Vec<LoanRepaymentLine>,
    /// The annual pension contribution from the request.
    pub pension_contribution: Decimal,
    /// What the contribution costs the employee out of pay.
    pub net_pension_cost: Decimal,
    /// Income tax + National Insurance + loan repayments.
    pub total_deductions: Decimal,
    /// Gross income minus total deductions.
    pub net_annual: Decimal,
    /// Net annual income divided by twelve.
    pub net_monthly: Decimal,
    /// Total deductions as a percentage of gross income (0 when gross is 0).
    pub effective_rate: Decimal,
    /// The rate at which the next pound of income is deducted, measured by
    /// re-running the calculation at a slightly higher gross income.
    pub marginal_rate: Decimal,
    /// Advisory notes for trap ranges. Presentation only.
    pub notes: Vec<CalculationNote>,
}

impl TaxBreakdown {
    /// Total annual student-loan repayments across all selected plans.
    pub fn total_student_loans(&self) -> Decimal {
        self.student_loans.iter().map(|l| l.amount).sum()
    }
}
