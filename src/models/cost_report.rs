//! Cost report models.
//!
//! This module contains the [`CostReport`] type assembled from an accrual walk
//! and a severance computation, together with the [`Advisory`] annotations
//! attached to results.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Charges, CompetencyMonth, Provisions, Sector, SeveranceResult, TerminationType};

/// How much attention an advisory deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    /// Purely informational.
    Info,
    /// Worth a second look.
    Notice,
}

/// An informational annotation attached to a result.
///
/// Advisories never reject a calculation.
///
/// # Example
///
/// ```
/// use labor_cost_engine::models::{Advisory, AdvisorySeverity};
///
/// let advisory = Advisory::info("NO_FULL_MONTH", "No full month worked");
/// assert_eq!(advisory.severity, AdvisorySeverity::Info);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// A code identifying the kind of advisory.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// The severity level.
    pub severity: AdvisorySeverity,
}

impl Advisory {
    /// Creates an informational advisory.
    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: AdvisorySeverity::Info,
        }
    }

    /// Creates an advisory that deserves attention.
    pub fn notice(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: AdvisorySeverity::Notice,
        }
    }
}

/// Summary of the employment period a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Resolved last day of employment.
    pub end_date: NaiveDate,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Sector as supplied by the caller.
    pub sector: Sector,
    /// Sector whose rates were applied.
    pub rated_sector: Sector,
    /// Termination type applied.
    pub termination_type: TerminationType,
    /// Calendar days from start to end date, both included.
    pub days_worked: u32,
    /// Calendar months covered end to end.
    pub full_months: u32,
}

/// Headline totals of a [`CostReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTotals {
    /// Sum of prorated salaries.
    pub salaries_paid: Decimal,
    /// Sum of mandatory employer charges.
    pub mandatory_charges: Decimal,
    /// Sum of provisioned liabilities.
    pub provisions: Decimal,
    /// Settlement owed at termination.
    pub termination_cost: Decimal,
    /// Salaries plus charges plus termination cost.
    pub estimated_total_cost: Decimal,
    /// Estimated total cost per competency.
    pub average_monthly_cost: Decimal,
    /// Charges plus termination cost as a percentage of salaries.
    pub charges_percentage: Decimal,
}

/// Combined accrual and severance view of one employment period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employment period covered.
    pub employee: EmployeeSummary,
    /// Month-by-month accrual.
    pub months: Vec<CompetencyMonth>,
    /// Charges accumulated by type.
    pub accumulated_charges: Charges,
    /// Provisions accumulated by type.
    pub accumulated_provisions: Provisions,
    /// Termination settlement.
    pub severance: SeveranceResult,
    /// Headline totals.
    pub totals: CostTotals,
    /// Informational annotations.
    pub advisories: Vec<Advisory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_constructors_set_severity() {
        assert_eq!(
            Advisory::info("A", "a").severity,
            AdvisorySeverity::Info
        );
        assert_eq!(
            Advisory::notice("B", "b").severity,
            AdvisorySeverity::Notice
        );
    }

    #[test]
    fn test_advisory_serialization() {
        let advisory = Advisory::notice("UNKNOWN_SECTOR", "fallback used");
        let json = serde_json::to_value(&advisory).unwrap();
        assert_eq!(json["code"], "UNKNOWN_SECTOR");
        assert_eq!(json["severity"], "notice");
    }
}
