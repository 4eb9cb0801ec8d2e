//! The calculation pipeline.
//!
//! This module sequences the individual calculators into one deterministic
//! pipeline: validate, adjust for pension, resolve the allowance, apply the
//! income-tax and National Insurance bands, compute loan repayments, then
//! derive totals, the effective rate, and the marginal rate.
//!
//! The marginal rate is measured rather than derived: the whole pipeline is
//! re-run at a slightly higher gross income and the deduction delta read
//! off, so taper, band, and loan-threshold crossings all land in one place
//! at the cost of one extra evaluation.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::config::{ConfigLoader, RateTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationNote, CalculationRequest, LoanRepaymentLine, PensionMode, TaxBreakdown,
};

use super::allowance::{AllowanceResult, resolve_allowance};
use super::banded::{BandedDeduction, apply_bands};
use super::pension::{PensionAdjustment, adjust_for_pension};
use super::student_loans::repayments_for;

/// Gross-income increment used by the marginal-rate probe.
pub const MARGINAL_RATE_PROBE_DELTA: Decimal = dec!(100);

/// Note code: adjusted net income sits inside the allowance taper.
pub const NOTE_ALLOWANCE_TAPER: &str = "allowance_taper";
/// Note code: two or more loan plans are repaying at once.
pub const NOTE_LOAN_STACKING: &str = "loan_stacking";
/// Note code: secondary income taxed without a personal allowance.
pub const NOTE_SECONDARY_INCOME: &str = "secondary_income";

/// Everything one pipeline run produces, before rates and notes.
struct PipelineOutcome {
    adjustment: PensionAdjustment,
    allowance: AllowanceResult,
    taxable_income: Decimal,
    income_tax: BandedDeduction,
    ni: BandedDeduction,
    loans: Vec<LoanRepaymentLine>,
    total_deductions: Decimal,
}

/// Calculates the deduction breakdown for a request, resolving the tax year
/// through the loader.
///
/// # Example
///
/// ```no_run
/// use paye_engine::calculation::calculate;
/// use paye_engine::config::ConfigLoader;
/// use paye_engine::models::CalculationRequest;
/// use rust_decimal_macros::dec;
///
/// let loader = ConfigLoader::load("./config/uk_paye")?;
/// let request = CalculationRequest::simple(dec!(50000), "2025/26");
///
/// let breakdown = calculate(&request, &loader)?;
/// println!("take home £{}/month", breakdown.net_monthly);
/// # Ok::<(), paye_engine::error::EngineError>(())
/// ```
pub fn calculate(
    request: &CalculationRequest,
    loader: &ConfigLoader,
) -> EngineResult<TaxBreakdown> {
    let table = loader.table(&request.tax_year)?;
    calculate_with_table(request, table)
}

/// Calculates the deduction breakdown for a request against one rate table.
///
/// This is the pure entry point: the result depends only on the request and
/// the table, and identical inputs produce identical breakdowns.
pub fn calculate_with_table(
    request: &CalculationRequest,
    table: &RateTable,
) -> EngineResult<TaxBreakdown> {
    validate_request(request, table)?;

    let gross = request.gross_income();
    let base = run_pipeline(gross, request, table)?;
    let probe = run_pipeline(gross + MARGINAL_RATE_PROBE_DELTA, request, table)?;

    let marginal_rate = round_to_penny(
        (probe.total_deductions - base.total_deductions) / MARGINAL_RATE_PROBE_DELTA
            * Decimal::ONE_HUNDRED,
    );
    let effective_rate = if gross.is_zero() {
        Decimal::ZERO
    } else {
        round_to_penny(base.total_deductions / gross * Decimal::ONE_HUNDRED)
    };

    let net_annual = gross - base.total_deductions;
    let net_monthly = round_to_penny(net_annual / dec!(12));
    let notes = build_notes(request, table, &base, marginal_rate);

    Ok(TaxBreakdown {
        tax_year: table.tax_year.clone(),
        gross_income: gross,
        personal_allowance: base.allowance.allowance,
        taxable_income: base.taxable_income,
        income_tax_bands: base.income_tax.lines,
        total_income_tax: base.income_tax.total,
        ni_bands: base.ni.lines,
        ni_contributions: base.ni.total,
        student_loans: base.loans,
        pension_contribution: base.adjustment.contribution,
        net_pension_cost: base.adjustment.net_cost,
        total_deductions: base.total_deductions,
        net_annual,
        net_monthly,
        effective_rate,
        marginal_rate,
        notes,
    })
}

/// The result of running the same request under both pension modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PensionModeComparison {
    /// The breakdown with the contribution taken by salary sacrifice.
    pub salary_sacrifice: TaxBreakdown,
    /// The breakdown with the contribution paid as a net contribution.
    pub net_contribution: TaxBreakdown,
}

/// Runs the same contribution amount under salary sacrifice and as a net
/// contribution, side by side.
///
/// Callers weighing up the two modes need both breakdowns; each is an
/// independent calculation and neither is derived from the other.
pub fn compare_pension_modes(
    request: &CalculationRequest,
    loader: &ConfigLoader,
) -> EngineResult<PensionModeComparison> {
    let table = loader.table(&request.tax_year)?;

    let mut sacrifice_request = request.clone();
    sacrifice_request.pension.mode = PensionMode::SalarySacrifice;

    let mut net_request = request.clone();
    net_request.pension.mode = PensionMode::NetContribution;

    Ok(PensionModeComparison {
        salary_sacrifice: calculate_with_table(&sacrifice_request, table)?,
        net_contribution: calculate_with_table(&net_request, table)?,
    })
}

/// Rejects bad caller input. The only failures a calculation can produce
/// happen here; everything downstream is total over the validated domain.
fn validate_request(request: &CalculationRequest, table: &RateTable) -> EngineResult<()> {
    if request.gross_salary < Decimal::ZERO {
        return Err(EngineError::NegativeAmount {
            field: "gross_salary".to_string(),
            amount: request.gross_salary,
        });
    }
    if request.bonus < Decimal::ZERO {
        return Err(EngineError::NegativeAmount {
            field: "bonus".to_string(),
            amount: request.bonus,
        });
    }
    if request.pension.amount < Decimal::ZERO {
        return Err(EngineError::NegativeAmount {
            field: "pension.amount".to_string(),
            amount: request.pension.amount,
        });
    }
    if request.pension.mode != PensionMode::None
        && request.pension.amount > request.gross_income()
    {
        return Err(EngineError::PensionExceedsGross {
            pension: request.pension.amount,
            gross: request.gross_income(),
        });
    }
    for plan in &request.student_loan_plans {
        table.loan_plan(*plan)?;
    }
    Ok(())
}

/// One full pass of the deduction pipeline at a given gross income.
///
/// Takes gross as a parameter so the marginal-rate probe can re-run the
/// pipeline at `gross + delta` with the request otherwise unchanged.
fn run_pipeline(
    gross: Decimal,
    request: &CalculationRequest,
    table: &RateTable,
) -> EngineResult<PipelineOutcome> {
    let adjustment = adjust_for_pension(gross, &request.pension);

    // A BR-code second job gets no allowance; otherwise the taper runs on
    // adjusted net income, which is the pension-adjusted tax base.
    let allowance = if request.is_secondary_income {
        AllowanceResult {
            allowance: Decimal::ZERO,
            reduction: Decimal::ZERO,
            tapered: false,
        }
    } else {
        resolve_allowance(adjustment.taxable_for_tax, table)
    };

    let taxable_income = (adjustment.taxable_for_tax - allowance.allowance).max(Decimal::ZERO);
    let income_tax = apply_bands(taxable_income, &table.income_tax.bands);
    let ni = apply_bands(adjustment.taxable_for_ni, &table.national_insurance.bands);

    // Loans repay on gross income as payroll sees it: salary sacrifice has
    // already reduced it, net contributions have not.
    let loans = repayments_for(adjustment.taxable_for_ni, &request.student_loan_plans, table)?;
    let loans_total: Decimal = loans.iter().map(|l| l.amount).sum();

    let total_deductions = income_tax.total + ni.total + loans_total;

    Ok(PipelineOutcome {
        adjustment,
        allowance,
        taxable_income,
        income_tax,
        ni,
        loans,
        total_deductions,
    })
}

/// Attaches trap-range notes. Notes never alter the numbers.
fn build_notes(
    request: &CalculationRequest,
    table: &RateTable,
    outcome: &PipelineOutcome,
    marginal_rate: Decimal,
) -> Vec<CalculationNote> {
    let mut notes = Vec::new();
    let it = &table.income_tax;

    if request.is_secondary_income {
        notes.push(CalculationNote {
            code: NOTE_SECONDARY_INCOME.to_string(),
            message: "No personal allowance applied: secondary income is taxed from the first pound"
                .to_string(),
        });
    }

    let adjusted_net_income = outcome.adjustment.taxable_for_tax;
    if !request.is_secondary_income
        && adjusted_net_income > it.taper_threshold
        && adjusted_net_income < it.taper_end
    {
        notes.push(CalculationNote {
            code: NOTE_ALLOWANCE_TAPER.to_string(),
            message: format!(
                "Adjusted net income is inside the personal allowance taper (£{} to £{}): \
                 every £{} earned here removes £1 of allowance, for a marginal rate of {}%",
                it.taper_threshold.normalize(),
                it.taper_end.normalize(),
                it.taper_divisor.normalize(),
                marginal_rate.normalize(),
            ),
        });
    }

    let repaying: Vec<&LoanRepaymentLine> = outcome
        .loans
        .iter()
        .filter(|l| l.amount > Decimal::ZERO)
        .collect();
    if repaying.len() >= 2 {
        let plans = repaying
            .iter()
            .map(|l| l.plan.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        let combined_rate: Decimal = repaying.iter().map(|l| l.rate).sum();
        notes.push(CalculationNote {
            code: NOTE_LOAN_STACKING.to_string(),
            message: format!(
                "Repaying {} simultaneously: a combined {}% of income above the thresholds",
                plans,
                (combined_rate * Decimal::ONE_HUNDRED).normalize(),
            ),
        });
    }

    notes
}

fn round_to_penny(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
