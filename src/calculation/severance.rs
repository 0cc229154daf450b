//! Termination settlement.
//!
//! Proportional thirteenth and vacation are driven by the count of qualifying
//! competencies, which is recounted here independently of the accrual walk:
//! under the 15-day rule a month qualifies only when at least 15 days of it
//! were worked. Termination-specific amounts (the fine on the severance fund
//! balance and the notice indemnity) depend on how the employment ended.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{CalculationConfig, VacationMethod};
use crate::error::EngineResult;
use crate::models::{Advisory, EmploymentPeriod, SeveranceResult, TerminationType};

use super::accrual::{DAYS_PER_YEAR, MONTHS_PER_YEAR, accrue_months};
use super::date_interval::{CompetencyCursor, exclusive_end, overlap_days};

/// Minimum worked days for a competency to qualify under the 15-day rule.
pub const FIFTEEN_DAY_THRESHOLD: u32 = 15;

/// Notice period for less than one year of service.
pub const BASE_NOTICE_DAYS: u32 = 30;

/// Notice days added per full year of service.
pub const NOTICE_DAYS_PER_YEAR: u32 = 3;

/// Cap on the notice period.
pub const MAX_NOTICE_DAYS: u32 = 90;

/// Days in the month used to derive a daily salary for notice indemnity.
pub const NOTICE_MONTH_DAYS: u32 = 30;

/// Qualifying competencies of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QualifyingMonths {
    /// Competencies counting toward the thirteenth salary.
    pub thirteenth: u32,
    /// Competencies counting toward vacation.
    pub vacation: u32,
    /// Calendar days in the interval.
    pub total_days_worked: u32,
}

/// Counts the competencies of `[start, end_exclusive)` that qualify for
/// proportional benefits.
///
/// With `fifteen_day_rule` a month needs at least
/// [`FIFTEEN_DAY_THRESHOLD`] calendar days worked; without it any overlap
/// counts.
pub fn count_qualifying_months(
    start: NaiveDate,
    end_exclusive: NaiveDate,
    fifteen_day_rule: bool,
) -> QualifyingMonths {
    CompetencyCursor::new(start, end_exclusive).fold(
        QualifyingMonths::default(),
        |mut tally, (year, month)| {
            let days_worked = overlap_days(start, end_exclusive, year, month);
            if days_worked > 0 {
                tally.total_days_worked += days_worked;
                if !fifteen_day_rule || days_worked >= FIFTEEN_DAY_THRESHOLD {
                    tally.thirteenth += 1;
                    tally.vacation += 1;
                }
            }
            tally
        },
    )
}

/// Notice period in days for the given length of service.
///
/// Thirty days plus three per full year of service, capped at ninety.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::notice_days;
///
/// assert_eq!(notice_days(200), 30);
/// assert_eq!(notice_days(5 * 365), 45);
/// assert_eq!(notice_days(25 * 365), 90);
/// ```
pub fn notice_days(total_days_worked: u32) -> u32 {
    let full_years = total_days_worked / DAYS_PER_YEAR;
    BASE_NOTICE_DAYS
        .saturating_add(NOTICE_DAYS_PER_YEAR.saturating_mul(full_years))
        .min(MAX_NOTICE_DAYS)
}

/// Fine on the severance fund balance for a termination type, if any.
///
/// Unjust dismissal carries 40%; mutual agreement carries 20%.
pub fn termination_fine_rate(termination_type: TerminationType) -> Option<Decimal> {
    match termination_type {
        TerminationType::UnjustDismissal => Some(Decimal::new(40, 2)),
        TerminationType::MutualAgreement => Some(Decimal::new(20, 2)),
        _ => None,
    }
}

/// Whether a termination type carries notice indemnity.
pub fn includes_notice_indemnity(termination_type: TerminationType) -> bool {
    matches!(termination_type, TerminationType::UnjustDismissal)
}

/// Computes the settlement owed when an employment period ends.
///
/// An open-ended period is settled as of today's UTC date; see
/// [`compute_severance_as_of`] to pin the reference date. A period without a
/// termination type is settled as [`TerminationType::ContractEnd`].
///
/// # Errors
///
/// Same input errors as
/// [`compute_accrual_period`](super::compute_accrual_period).
pub fn compute_severance(
    period: &EmploymentPeriod,
    config: &CalculationConfig,
) -> EngineResult<SeveranceResult> {
    compute_severance_as_of(period, config, Utc::now().date_naive())
}

/// [`compute_severance`] with an explicit reference date for open periods.
pub fn compute_severance_as_of(
    period: &EmploymentPeriod,
    config: &CalculationConfig,
    today: NaiveDate,
) -> EngineResult<SeveranceResult> {
    config.validate()?;
    let end = period.validate(today)?;
    let end_exclusive = exclusive_end(end, config.inclusive_end);
    let rounding = &config.rounding;
    let base_salary = period.base_salary;
    let termination_type = period.termination_type.unwrap_or_default();

    let qualifying = count_qualifying_months(period.start_date, end_exclusive, config.fifteen_day_rule);

    let monthly_fraction = base_salary / Decimal::from(MONTHS_PER_YEAR);
    let proportional_thirteenth =
        rounding.round(monthly_fraction * Decimal::from(qualifying.thirteenth));
    let proportional_vacation = match config.vacation_method {
        VacationMethod::MonthlyFraction => {
            rounding.round(monthly_fraction * Decimal::from(qualifying.vacation))
        }
        VacationMethod::DailyFraction => {
            let days = Decimal::from(qualifying.total_days_worked);
            rounding.round(monthly_fraction * days / Decimal::from(DAYS_PER_YEAR))
        }
    };
    let vacation_bonus = rounding.round(proportional_vacation / Decimal::from(3));
    let severance_fund_on_benefits = rounding.round(
        (proportional_thirteenth + proportional_vacation + vacation_bonus)
            * config.rates.severance_fund,
    );
    let total = rounding.sum([
        proportional_thirteenth,
        proportional_vacation,
        vacation_bonus,
        severance_fund_on_benefits,
    ]);

    let severance_fund_balance = rounding.sum(
        accrue_months(base_salary, period.start_date, end_exclusive, config)
            .iter()
            .map(|month| month.charges.severance_fund),
    );

    let mut advisories = Vec::new();
    let termination_fine = termination_fine_rate(termination_type)
        .map(|rate| rounding.round(severance_fund_balance * rate));
    let notice = includes_notice_indemnity(termination_type).then(|| {
        let days = notice_days(qualifying.total_days_worked);
        let indemnity = rounding.round(
            base_salary / Decimal::from(NOTICE_MONTH_DAYS) * Decimal::from(days),
        );
        (days, indemnity)
    });

    match termination_type {
        TerminationType::UnjustDismissal => advisories.push(Advisory::info(
            "FINE_AND_NOTICE_INCLUDED",
            "Included 40% severance fund fine and notice indemnity",
        )),
        TerminationType::MutualAgreement => advisories.push(Advisory::info(
            "AGREEMENT_FINE_INCLUDED",
            "Included 20% severance fund fine (mutual agreement)",
        )),
        _ => {}
    }

    let settlement_total = rounding.sum(
        [
            Some(total),
            termination_fine,
            notice.map(|(_, indemnity)| indemnity),
        ]
        .into_iter()
        .flatten(),
    );

    debug!(
        start = %period.start_date,
        end = %end,
        termination_type = ?termination_type,
        qualifying_months = qualifying.thirteenth,
        total_days_worked = qualifying.total_days_worked,
        settlement_total = %settlement_total,
        "Severance computed"
    );

    Ok(SeveranceResult {
        qualifying_months_for_thirteenth: qualifying.thirteenth,
        qualifying_months_for_vacation: qualifying.vacation,
        total_days_worked: qualifying.total_days_worked,
        proportional_thirteenth,
        proportional_vacation,
        vacation_bonus,
        severance_fund_on_benefits,
        severance_fund_balance,
        termination_fine,
        notice_days: notice.map(|(days, _)| days),
        notice_indemnity: notice.map(|(_, indemnity)| indemnity),
        total,
        settlement_total,
        advisories,
    })
}
