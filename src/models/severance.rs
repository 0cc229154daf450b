//! Termination settlement model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Advisory;

/// Amounts owed when an employment period ends.
///
/// `termination_fine`, `notice_days` and `notice_indemnity` are only present
/// for termination types that carry them and are omitted from the serialized
/// form otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceResult {
    /// Competencies counting toward the proportional thirteenth salary.
    pub qualifying_months_for_thirteenth: u32,
    /// Competencies counting toward proportional vacation.
    pub qualifying_months_for_vacation: u32,
    /// Calendar days in the employment interval.
    pub total_days_worked: u32,
    /// Proportional thirteenth salary.
    pub proportional_thirteenth: Decimal,
    /// Proportional vacation.
    pub proportional_vacation: Decimal,
    /// One third of the proportional vacation.
    pub vacation_bonus: Decimal,
    /// Severance fund deposit due on the three benefits above.
    pub severance_fund_on_benefits: Decimal,
    /// Severance fund balance accumulated over the period.
    pub severance_fund_balance: Decimal,
    /// Fine on the severance fund balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_fine: Option<Decimal>,
    /// Notice period in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_days: Option<u32>,
    /// Payment in lieu of the notice period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_indemnity: Option<Decimal>,
    /// Rounding-safe sum of the four proportional benefits.
    pub total: Decimal,
    /// Total plus fine and notice indemnity, when present.
    pub settlement_total: Decimal,
    /// Informational annotations.
    #[serde(default)]
    pub advisories: Vec<Advisory>,
}
