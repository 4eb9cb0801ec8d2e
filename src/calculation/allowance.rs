//! Personal-allowance resolution.
//!
//! The personal allowance tapers away for high earners: £1 of allowance is
//! lost for every `taper_divisor` pounds of adjusted net income above the
//! taper threshold, reaching zero at `taper_end`. Off-by-one errors at the
//! two boundaries are the classic bug here, so both are pinned by tests.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RateTable;

/// The result of resolving the personal allowance for an income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceResult {
    /// The allowance to apply, after any taper.
    pub allowance: Decimal,
    /// How much of the base allowance the taper removed.
    pub reduction: Decimal,
    /// True when the taper removed any allowance.
    pub tapered: bool,
}

/// Resolves the personal allowance for an adjusted net income.
///
/// At or below the taper threshold the full allowance applies; at or above
/// `taper_end` the allowance is zero; in between, the reduction is
/// `(income - threshold) / taper_divisor`, floored to the penny and clamped
/// so the allowance never goes negative.
///
/// This is a total function: an invalid taper configuration is rejected when
/// the table loads, never here.
pub fn resolve_allowance(adjusted_net_income: Decimal, table: &RateTable) -> AllowanceResult {
    let it = &table.income_tax;

    if adjusted_net_income <= it.taper_threshold {
        return AllowanceResult {
            allowance: it.personal_allowance,
            reduction: Decimal::ZERO,
            tapered: false,
        };
    }

    if adjusted_net_income >= it.taper_end {
        return AllowanceResult {
            allowance: Decimal::ZERO,
            reduction: it.personal_allowance,
            tapered: true,
        };
    }

    let reduction = ((adjusted_net_income - it.taper_threshold) / it.taper_divisor)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
        .min(it.personal_allowance);

    AllowanceResult {
        allowance: it.personal_allowance - reduction,
        reduction,
        tapered: reduction > Decimal::ZERO,
    }
}
