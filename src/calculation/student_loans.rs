//! Student-loan repayment calculation.
//!
//! Each selected plan is an independent flat-rate-above-threshold scheme.
//! Plans stack additively: selecting Plan 2 and the postgraduate loan
//! together is routine, and each repayment is computed against the full
//! relevant income, never against another plan's residual. The engine does
//! not try to detect plan combinations that cannot co-occur for one
//! borrower; that validation belongs to the caller.

use std::collections::BTreeSet;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{LoanRepaymentLine, StudentLoanPlan};

/// Calculates the annual repayment for every selected plan.
///
/// The relevant income is gross income as the payroll sees it: salary
/// sacrifice (and only salary sacrifice) has already reduced it, matching
/// the simplification that loans are repaid on gross rather than on any
/// plan-specific income definition. Repayments are
/// `max(0, income - threshold) * rate`, rounded DOWN to the penny per the
/// official convention, and a line is returned for every selected plan even
/// when its repayment is zero.
///
/// Duplicate plan selections are collapsed; an unknown plan for the table's
/// tax year returns `UnknownPlan`.
pub fn repayments_for(
    relevant_income: Decimal,
    plans: &[StudentLoanPlan],
    table: &RateTable,
) -> EngineResult<Vec<LoanRepaymentLine>> {
    let selected: BTreeSet<StudentLoanPlan> = plans.iter().copied().collect();
    let mut lines = Vec::with_capacity(selected.len());

    for plan in selected {
        let rates = table.loan_plan(plan)?;

        let excess = relevant_income - rates.threshold;
        let amount = if excess > Decimal::ZERO {
            (excess * rates.rate).round_dp_with_strategy(2, RoundingStrategy::ToZero)
        } else {
            Decimal::ZERO
        };

        lines.push(LoanRepaymentLine {
            plan,
            threshold: rates.threshold,
            rate: rates.rate,
            amount,
        });
    }

    Ok(lines)
}
