//! Rate-table types for the PAYE calculation engine.
//!
//! This module contains the strongly-typed rate-table structures that are
//! deserialized from YAML configuration files, plus the load-time validation
//! that keeps every downstream calculation total.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::StudentLoanPlan;

/// One band of a progressive deduction table.
#[derive(Debug, Clone, Deserialize)]
pub struct Band {
    /// The band name (e.g. "basic", "higher").
    pub name: String,
    /// The lower bound of the band (inclusive).
    pub lower: Decimal,
    /// The upper bound of the band (exclusive), or `None` for the unbounded
    /// top band.
    pub upper: Option<Decimal>,
    /// The deduction rate inside the band, as a fraction in [0, 1].
    pub rate: Decimal,
}

/// Income-tax configuration: the personal allowance with its taper, and the
/// progressive bands applied to taxable income.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTaxConfig {
    /// The base personal allowance.
    pub personal_allowance: Decimal,
    /// Adjusted net income above which the allowance starts to taper.
    pub taper_threshold: Decimal,
    /// Adjusted net income at which the allowance reaches zero.
    pub taper_end: Decimal,
    /// Pounds of income above the threshold that remove one pound of
    /// allowance (2 means £1 lost per £2 of income).
    pub taper_divisor: Decimal,
    /// Progressive bands over taxable income (post-allowance).
    pub bands: Vec<Band>,
}

/// Class 1 National Insurance configuration.
///
/// NI has its own thresholds, unaffected by the personal allowance, so the
/// band table starts with an explicit 0% band up to the primary threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct NationalInsuranceConfig {
    /// Progressive bands over NI-able income.
    pub bands: Vec<Band>,
}

/// Threshold and rate for one student-loan repayment plan.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LoanPlanRates {
    /// Annual income threshold below which nothing is repaid.
    pub threshold: Decimal,
    /// Flat repayment rate on income above the threshold.
    pub rate: Decimal,
}

/// The complete rate table for one tax year.
///
/// A table is immutable once loaded and validated; every calculation is a
/// pure function of the request and one of these.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// The tax-year label, e.g. `"2025/26"`.
    pub tax_year: String,
    /// The 6 April this tax year begins.
    pub starts_on: NaiveDate,
    /// Income-tax allowance, taper, and bands.
    pub income_tax: IncomeTaxConfig,
    /// National Insurance bands.
    pub national_insurance: NationalInsuranceConfig,
    /// The repayment plans available in this year. The set varies between
    /// years (Plan 5 only exists from 2025/26).
    pub student_loans: BTreeMap<StudentLoanPlan, LoanPlanRates>,
    /// Annual ISA allowance. Not used by this engine; carried for sibling
    /// tools that share the table.
    pub isa_allowance: Decimal,
}

impl RateTable {
    /// Checks every structural invariant of the table.
    ///
    /// Called once at load time; a table that passes makes all downstream
    /// calculation code total over non-negative incomes.
    pub fn validate(&self) -> EngineResult<()> {
        self.validate_bands(&self.income_tax.bands, "income_tax")?;
        self.validate_bands(&self.national_insurance.bands, "national_insurance")?;

        // Income-tax rates must not fall as income rises; NI rates do fall
        // above the upper earnings limit, so only income tax is checked.
        let rates: Vec<Decimal> = self.income_tax.bands.iter().map(|b| b.rate).collect();
        if rates.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(self.malformed("income_tax band rates must be non-decreasing"));
        }

        let it = &self.income_tax;
        if it.personal_allowance < Decimal::ZERO {
            return Err(self.malformed("personal_allowance must be non-negative"));
        }
        if it.taper_divisor <= Decimal::ZERO {
            return Err(self.malformed("taper_divisor must be positive"));
        }
        if it.taper_threshold >= it.taper_end {
            return Err(self.malformed("taper_threshold must be below taper_end"));
        }
        // The allowance must reach exactly zero at taper_end, otherwise the
        // taper formula and the taper_end cutoff would disagree.
        let expected_end = it.taper_threshold + it.personal_allowance * it.taper_divisor;
        if it.taper_end != expected_end {
            return Err(self.malformed(format!(
                "taper_end must equal taper_threshold + personal_allowance * taper_divisor ({})",
                expected_end
            )));
        }

        for (plan, rates) in &self.student_loans {
            if rates.threshold < Decimal::ZERO {
                return Err(self.malformed(format!("{} threshold must be non-negative", plan)));
            }
            if rates.rate < Decimal::ZERO || rates.rate > Decimal::ONE {
                return Err(self.malformed(format!("{} rate must be within [0, 1]", plan)));
            }
        }

        if self.isa_allowance < Decimal::ZERO {
            return Err(self.malformed("isa_allowance must be non-negative"));
        }

        Ok(())
    }

    /// Bands must be contiguous and gapless from zero, end unbounded, and
    /// carry rates in [0, 1].
    fn validate_bands(&self, bands: &[Band], section: &str) -> EngineResult<()> {
        let Some(first) = bands.first() else {
            return Err(self.malformed(format!("{} has no bands", section)));
        };
        if first.lower != Decimal::ZERO {
            return Err(self.malformed(format!("{} bands must start at zero", section)));
        }

        for pair in bands.windows(2) {
            match pair[0].upper {
                Some(upper) if upper == pair[1].lower => {}
                Some(_) => {
                    return Err(self.malformed(format!(
                        "{} bands '{}' and '{}' are not contiguous",
                        section, pair[0].name, pair[1].name
                    )));
                }
                None => {
                    return Err(self.malformed(format!(
                        "{} band '{}' is unbounded but not last",
                        section, pair[0].name
                    )));
                }
            }
        }

        for band in bands {
            if let Some(upper) = band.upper {
                if upper <= band.lower {
                    return Err(self.malformed(format!(
                        "{} band '{}' has upper bound at or below its lower bound",
                        section, band.name
                    )));
                }
            }
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(self.malformed(format!(
                    "{} band '{}' rate must be within [0, 1]",
                    section, band.name
                )));
            }
        }

        if bands
            .last()
            .is_some_and(|band| band.upper.is_some())
        {
            return Err(self.malformed(format!("{} bands must cover all income", section)));
        }

        Ok(())
    }

    /// Gets the repayment rates for a plan, or `UnknownPlan` when the plan
    /// does not exist in this year's table.
    pub fn loan_plan(&self, plan: StudentLoanPlan) -> EngineResult<&LoanPlanRates> {
        self.student_loans
            .get(&plan)
            .ok_or_else(|| EngineError::UnknownPlan {
                plan: plan.to_string(),
                tax_year: self.tax_year.clone(),
            })
    }

    fn malformed(&self, message: impl Into<String>) -> EngineError {
        EngineError::MalformedRateTable {
            tax_year: self.tax_year.clone(),
            message: message.into(),
        }
    }
}
