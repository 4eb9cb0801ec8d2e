//! Pension contribution adjustment.
//!
//! The contribution mode decides which deduction bases the pension reduces,
//! which is where the engine's core subtlety lives: the same contribution
//! amount produces different total deductions depending on mode.

use rust_decimal::Decimal;

use crate::models::{PensionContribution, PensionMode};

/// The deduction bases after applying a pension contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PensionAdjustment {
    /// The base for income tax (and the adjusted net income used by the
    /// allowance taper).
    pub taxable_for_tax: Decimal,
    /// The base for National Insurance and student-loan repayments.
    pub taxable_for_ni: Decimal,
    /// The contribution actually applied (zero when the mode is `None`).
    pub contribution: Decimal,
    /// What the contribution costs the employee out of pay.
    pub net_cost: Decimal,
}

/// Applies a pension contribution to gross income.
///
/// - `SalarySacrifice` reduces gross before everything: both bases shrink.
/// - `NetContribution` (relief at source) reduces the income-tax base only;
///   National Insurance is unaffected.
/// - `None` leaves both bases at gross and ignores any amount supplied.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::adjust_for_pension;
/// use paye_engine::models::PensionContribution;
/// use rust_decimal_macros::dec;
///
/// let sacrifice = adjust_for_pension(
///     dec!(60000),
///     &PensionContribution::salary_sacrifice(dec!(5000)),
/// );
/// assert_eq!(sacrifice.taxable_for_tax, dec!(55000));
/// assert_eq!(sacrifice.taxable_for_ni, dec!(55000));
///
/// let net = adjust_for_pension(
///     dec!(60000),
///     &PensionContribution::net_contribution(dec!(5000)),
/// );
/// assert_eq!(net.taxable_for_tax, dec!(55000));
/// assert_eq!(net.taxable_for_ni, dec!(60000));
/// ```
pub fn adjust_for_pension(gross: Decimal, pension: &PensionContribution) -> PensionAdjustment {
    match pension.mode {
        PensionMode::None => PensionAdjustment {
            taxable_for_tax: gross,
            taxable_for_ni: gross,
            contribution: Decimal::ZERO,
            net_cost: Decimal::ZERO,
        },
        PensionMode::SalarySacrifice => PensionAdjustment {
            taxable_for_tax: gross - pension.amount,
            taxable_for_ni: gross - pension.amount,
            contribution: pension.amount,
            net_cost: pension.amount,
        },
        PensionMode::NetContribution => PensionAdjustment {
            taxable_for_tax: gross - pension.amount,
            taxable_for_ni: gross,
            contribution: pension.amount,
            net_cost: pension.amount,
        },
    }
}
