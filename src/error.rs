//! Error types for the PAYE calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables or
//! validating calculation requests.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the PAYE calculation engine.
///
/// Configuration variants can only be produced while loading rate tables;
/// the remaining variants are request-validation failures and are the only
/// errors a calculation can return. All of them are recoverable by the
/// caller.
///
/// # Example
///
/// ```
/// use paye_engine::error::EngineError;
///
/// let error = EngineError::UnknownTaxYear {
///     tax_year: "1999/00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown tax year: 1999/00");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table violated a structural invariant at load time.
    #[error("Malformed rate table '{tax_year}': {message}")]
    MalformedRateTable {
        /// The tax-year label of the offending table.
        tax_year: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// A monetary input field was negative.
    #[error("Field '{field}' cannot be negative: {amount}")]
    NegativeAmount {
        /// The request field that was negative.
        field: String,
        /// The offending value.
        amount: Decimal,
    },

    /// The pension contribution exceeded gross income.
    #[error("Pension contribution {pension} exceeds gross income {gross}")]
    PensionExceedsGross {
        /// The requested pension contribution.
        pension: Decimal,
        /// The gross income it was compared against.
        gross: Decimal,
    },

    /// A selected student-loan plan does not exist in the tax year's table.
    #[error("Student loan plan not available in tax year {tax_year}: {plan}")]
    UnknownPlan {
        /// The plan that was not found.
        plan: String,
        /// The tax year whose table was consulted.
        tax_year: String,
    },

    /// The requested tax-year label is not supported.
    #[error("Unknown tax year: {tax_year}")]
    UnknownTaxYear {
        /// The label that was not recognized.
        tax_year: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_malformed_rate_table_displays_year_and_message() {
        let error = EngineError::MalformedRateTable {
            tax_year: "2025/26".to_string(),
            message: "bands do not cover income from zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed rate table '2025/26': bands do not cover income from zero"
        );
    }

    #[test]
    fn test_negative_amount_displays_field_and_value() {
        let error = EngineError::NegativeAmount {
            field: "gross_salary".to_string(),
            amount: dec!(-1000),
        };
        assert_eq!(
            error.to_string(),
            "Field 'gross_salary' cannot be negative: -1000"
        );
    }

    #[test]
    fn test_pension_exceeds_gross_displays_both_amounts() {
        let error = EngineError::PensionExceedsGross {
            pension: dec!(60000),
            gross: dec!(50000),
        };
        assert_eq!(
            error.to_string(),
            "Pension contribution 60000 exceeds gross income 50000"
        );
    }

    #[test]
    fn test_unknown_plan_displays_plan_and_year() {
        let error = EngineError::UnknownPlan {
            plan: "Plan 5".to_string(),
            tax_year: "2024/25".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Student loan plan not available in tax year 2024/25: Plan 5"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unknown_tax_year() -> EngineResult<()> {
            Err(EngineError::UnknownTaxYear {
                tax_year: "1999/00".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unknown_tax_year()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
