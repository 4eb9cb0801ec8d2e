//! Request types for the PAYE engine API.
//!
//! This module defines the JSON request structure for the `/calculate`
//! endpoint and its conversion into the domain request type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationRequest, PensionContribution, StudentLoanPlan};

/// Request body for the `/calculate` endpoint.
///
/// Monetary values are decimal strings (e.g. `"45000"`); only
/// `gross_salary` and `tax_year` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateApiRequest {
    /// Annual gross salary before any deductions.
    pub gross_salary: Decimal,
    /// Annual bonus, added to salary to form gross income.
    #[serde(default)]
    pub bonus: Decimal,
    /// Employee pension contribution (amount and mode).
    #[serde(default)]
    pub pension: PensionContribution,
    /// Student-loan plans being repaid.
    #[serde(default)]
    pub student_loan_plans: Vec<StudentLoanPlan>,
    /// True for a BR-code second job (no personal allowance).
    #[serde(default)]
    pub is_secondary_income: bool,
    /// The tax-year label to calculate under, e.g. `"2025/26"`.
    pub tax_year: String,
}

impl From<CalculateApiRequest> for CalculationRequest {
    fn from(req: CalculateApiRequest) -> Self {
        CalculationRequest {
            gross_salary: req.gross_salary,
            bonus: req.bonus,
            pension: req.pension,
            student_loan_plans: req.student_loan_plans,
            is_secondary_income: req.is_secondary_income,
            tax_year: req.tax_year,
        }
    }
}
