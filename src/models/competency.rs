//! Competency and period report models.
//!
//! A competency is one calendar month, the atomic accrual unit. This module
//! contains the per-competency [`CompetencyMonth`] record and the
//! [`PeriodReport`] that aggregates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mandatory employer charges on the prorated salary of one competency.
///
/// Also used for charges accumulated over a whole period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Charges {
    /// Employer social security contribution.
    pub employer_social_security: Decimal,
    /// Severance fund deposit.
    pub severance_fund: Decimal,
    /// Risk insurance.
    pub risk_insurance: Decimal,
    /// Third-party levies.
    pub third_party_levy: Decimal,
    /// Rounding-safe sum of the four charges.
    pub total: Decimal,
}

/// Liabilities provisioned for one competency.
///
/// Also used for provisions accumulated over a whole period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Provisions {
    /// Thirteenth-salary accrual.
    pub thirteenth_salary: Decimal,
    /// Vacation accrual.
    pub vacation: Decimal,
    /// One third of the vacation accrual.
    pub vacation_bonus: Decimal,
    /// Severance fund deposit due on the three provisions above.
    pub severance_fund_on_provisions: Decimal,
    /// Rounding-safe sum of the four provisions.
    pub total: Decimal,
}

/// One calendar month's slice of an employment period.
///
/// Every monetary field is already rounded under the active rounding
/// configuration, and `days_worked` never exceeds `days_in_month`.
///
/// # Example
///
/// ```
/// use labor_cost_engine::models::{Charges, CompetencyMonth, Provisions};
/// use rust_decimal::Decimal;
///
/// let month = CompetencyMonth {
///     year: 2025,
///     month: 5,
///     days_in_month: 31,
///     days_worked: 31,
///     salary_factor: Decimal::ONE,
///     provisions_factor: Decimal::ONE,
///     prorated_salary: Decimal::new(1000000, 2),
///     charges: Charges::default(),
///     provisions: Provisions::default(),
///     month_total: Decimal::ZERO,
///     total_cost: Decimal::new(1000000, 2),
///     is_fully_provisioned: true,
/// };
/// assert_eq!(month.competency_id(), "2025-05");
/// assert!(month.is_full());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyMonth {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// Length of the month under the active day-count basis.
    pub days_in_month: u32,
    /// Days of the employment interval falling in this month.
    pub days_worked: u32,
    /// Fraction of the base salary earned in this month.
    pub salary_factor: Decimal,
    /// Fraction of a monthly thirteenth accrual provisioned in this month.
    pub provisions_factor: Decimal,
    /// Salary earned in this month.
    pub prorated_salary: Decimal,
    /// Employer charges on the prorated salary.
    pub charges: Charges,
    /// Provisioned liabilities.
    pub provisions: Provisions,
    /// Charges plus provisions.
    pub month_total: Decimal,
    /// Month total plus the prorated salary.
    pub total_cost: Decimal,
    /// Whether thirteenth and vacation were provisioned for this slice.
    pub is_fully_provisioned: bool,
}

impl CompetencyMonth {
    /// Competency identifier in `YYYY-MM` form.
    pub fn competency_id(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Returns `true` when the whole month was worked.
    pub fn is_full(&self) -> bool {
        self.days_worked >= self.days_in_month
    }
}

/// Aggregate totals of a [`PeriodReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of prorated salaries.
    pub salary: Decimal,
    /// Sum of charge totals.
    pub charges: Decimal,
    /// Sum of provision totals.
    pub provisions: Decimal,
    /// Charges plus provisions.
    pub grand_total: Decimal,
}

/// Month-by-month accrual over an employment period.
///
/// The totals always equal the rounding-safe sum of the per-month values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Competencies in chronological order; months without worked days are omitted.
    pub months: Vec<CompetencyMonth>,
    /// Aggregate totals.
    pub totals: PeriodTotals,
}
