//! Calculation request model and related types.
//!
//! This module defines the [`CalculationRequest`] struct together with the
//! pension-contribution and student-loan types that parameterize a
//! calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A UK student-loan repayment plan.
///
/// Plans are independent schemes: each has its own annual threshold and
/// repayment rate, and a borrower can be on several at once (most commonly
/// an undergraduate plan plus the postgraduate loan).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StudentLoanPlan {
    /// Plan 1 (pre-2012 undergraduate loans).
    #[serde(rename = "plan_1")]
    Plan1,
    /// Plan 2 (post-2012 undergraduate loans, England and Wales).
    #[serde(rename = "plan_2")]
    Plan2,
    /// Plan 4 (Scottish undergraduate loans).
    #[serde(rename = "plan_4")]
    Plan4,
    /// Plan 5 (undergraduate loans from August 2023).
    #[serde(rename = "plan_5")]
    Plan5,
    /// Postgraduate master's/doctoral loan.
    #[serde(rename = "postgraduate")]
    Postgraduate,
}

impl std::fmt::Display for StudentLoanPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StudentLoanPlan::Plan1 => "Plan 1",
            StudentLoanPlan::Plan2 => "Plan 2",
            StudentLoanPlan::Plan4 => "Plan 4",
            StudentLoanPlan::Plan5 => "Plan 5",
            StudentLoanPlan::Postgraduate => "Postgraduate Loan",
        };
        write!(f, "{}", name)
    }
}

/// How a pension contribution is taken from pay.
///
/// The mode decides which deduction bases the contribution reduces, which is
/// the core semantic distinction of the engine: the same amount produces
/// different total deductions depending on mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionMode {
    /// No pension contribution.
    #[default]
    None,
    /// Salary sacrifice: the contribution reduces gross pay before income
    /// tax, National Insurance, and student-loan repayments.
    SalarySacrifice,
    /// Net contribution with relief at source: the contribution reduces the
    /// income-tax base only; National Insurance is unaffected.
    NetContribution,
}

/// An employee pension contribution: an annual amount and the mode it is
/// paid under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionContribution {
    /// The annual contribution amount.
    #[serde(default)]
    pub amount: Decimal,
    /// How the contribution is taken from pay.
    #[serde(default)]
    pub mode: PensionMode,
}

impl PensionContribution {
    /// A contribution of the given amount by salary sacrifice.
    pub fn salary_sacrifice(amount: Decimal) -> Self {
        Self {
            amount,
            mode: PensionMode::SalarySacrifice,
        }
    }

    /// A net contribution of the given amount (relief at source).
    pub fn net_contribution(amount: Decimal) -> Self {
        Self {
            amount,
            mode: PensionMode::NetContribution,
        }
    }
}

/// A request to calculate the deductions on one year of employment income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Annual gross salary before any deductions.
    pub gross_salary: Decimal,
    /// Annual bonus, added to salary to form gross income.
    #[serde(default)]
    pub bonus: Decimal,
    /// Employee pension contribution.
    #[serde(default)]
    pub pension: PensionContribution,
    /// The student-loan plans the employee is repaying. Plans stack; an
    /// empty list means no repayments.
    #[serde(default)]
    pub student_loan_plans: Vec<StudentLoanPlan>,
    /// True when this income is a second job taxed under a BR code: no
    /// personal allowance applies and the allowance taper is irrelevant.
    #[serde(default)]
    pub is_secondary_income: bool,
    /// The tax-year label to calculate under, e.g. `"2025/26"`.
    pub tax_year: String,
}

impl CalculationRequest {
    /// A request for plain salaried income with no pension or loans.
    pub fn simple(gross_salary: Decimal, tax_year: impl Into<String>) -> Self {
        Self {
            gross_salary,
            bonus: Decimal::ZERO,
            pension: PensionContribution::default(),
            student_loan_plans: Vec::new(),
            is_secondary_income: false,
            tax_year: tax_year.into(),
        }
    }

    /// Total gross income for the year (salary plus bonus).
    pub fn gross_income(&self) -> Decimal {
        self.gross_salary + self.bonus
    }
}
