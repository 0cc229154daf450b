//! Error types for the labor-cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that rejects a calculation or a configuration.
//! Unknown sector codes are deliberately absent: they fall back to the
//! default sector and surface as an advisory instead.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the labor-cost engine.
///
/// All fallible operations in the engine return this error type. Input
/// errors are raised before any competency is processed, so a failed call
/// never leaves partial results behind.
///
/// # Example
///
/// ```
/// use labor_cost_engine::error::EngineError;
/// use rust_decimal::Decimal;
///
/// let error = EngineError::InvalidSalary {
///     salary: Decimal::ZERO,
/// };
/// assert_eq!(error.to_string(), "Base salary must be greater than zero and at most 1000000000, got 0");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The end date of the employment interval precedes its start date.
    #[error("Invalid interval: end date {end} precedes start date {start}")]
    InvalidInterval {
        /// The first day of employment.
        start: NaiveDate,
        /// The (resolved) last day of employment.
        end: NaiveDate,
    },

    /// The base salary is not positive or exceeds the accepted ceiling.
    #[error(
        "Base salary must be greater than zero and at most {max}, got {salary}",
        max = crate::models::MAX_BASE_SALARY
    )]
    InvalidSalary {
        /// The rejected salary.
        salary: Decimal,
    },

    /// Configuration file was not found at the specified path.
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

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invalid_interval_displays_both_dates() {
        let error = EngineError::InvalidInterval {
            start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid interval: end date 2025-02-01 precedes start date 2025-03-01"
        );
    }

    #[test]
    fn test_invalid_salary_displays_value() {
        let error = EngineError::InvalidSalary {
            salary: Decimal::from_str("-1500.00").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Base salary must be greater than zero and at most 1000000000, got -1500.00"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/sectors.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/sectors.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "rates.risk_insurance".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'rates.risk_insurance': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn rejects_salary() -> EngineResult<()> {
            Err(EngineError::InvalidSalary {
                salary: Decimal::ZERO,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            rejects_salary()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::InvalidSalary { .. })
        ));
    }
}
