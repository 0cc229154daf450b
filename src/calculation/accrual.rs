//! Month-by-month accrual of employer charges and provisions.
//!
//! For each competency the employment interval touches, this module prorates
//! the salary, applies the employer charge rates, and provisions thirteenth
//! salary, vacation, the one-third vacation bonus, and the severance fund due
//! on those provisions. Period totals are rounding-safe sums of the rounded
//! per-month values.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{CalculationConfig, ChargeRates, RoundingConfig, VacationMethod};
use crate::error::EngineResult;
use crate::models::{Charges, CompetencyMonth, EmploymentPeriod, PeriodReport, PeriodTotals, Provisions};

use super::date_interval::{CompetencyCursor, days_in_month, exclusive_end, worked_days_under_basis};

/// Months in a year, the denominator of every monthly provision fraction.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Days in a year under the daily vacation method.
pub const DAYS_PER_YEAR: u32 = 365;

/// Proration factors of one competency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProrationFactors {
    /// Fraction of the base salary earned.
    pub salary: Decimal,
    /// Fraction of a monthly thirteenth accrual provisioned.
    pub thirteenth: Decimal,
    /// Fraction of a monthly vacation accrual provisioned.
    pub vacation: Decimal,
    /// Whether thirteenth and vacation were provisioned at all.
    pub provisioned: bool,
}

/// Determines the proration factors for a competency.
///
/// A month worked in full gets factor 1 everywhere. A partial month earns
/// `days_worked / days_in_month` of the salary. Its provisions are zero when
/// partial-month provisioning is disabled, follow the salary factor under
/// the monthly vacation method, and use `days_worked / 365` for both the
/// thirteenth and vacation under the daily method.
pub fn proration_factors(
    days_worked: u32,
    days_in_month: u32,
    config: &CalculationConfig,
) -> ProrationFactors {
    if days_worked >= days_in_month {
        return ProrationFactors {
            salary: Decimal::ONE,
            thirteenth: Decimal::ONE,
            vacation: Decimal::ONE,
            provisioned: true,
        };
    }

    let salary = (Decimal::from(days_worked) / Decimal::from(days_in_month)).min(Decimal::ONE);
    if !config.provision_partial_month {
        return ProrationFactors {
            salary,
            thirteenth: Decimal::ZERO,
            vacation: Decimal::ZERO,
            provisioned: false,
        };
    }

    let provisions = match config.vacation_method {
        VacationMethod::MonthlyFraction => salary,
        VacationMethod::DailyFraction => Decimal::from(days_worked) / Decimal::from(DAYS_PER_YEAR),
    };

    ProrationFactors {
        salary,
        thirteenth: provisions,
        vacation: provisions,
        provisioned: true,
    }
}

/// Applies the employer charge rates to a prorated salary.
pub fn compute_charges(prorated_salary: Decimal, rates: &ChargeRates, rounding: &RoundingConfig) -> Charges {
    let employer_social_security = rounding.round(prorated_salary * rates.employer_social_security);
    let severance_fund = rounding.round(prorated_salary * rates.severance_fund);
    let risk_insurance = rounding.round(prorated_salary * rates.risk_insurance);
    let third_party_levy = rounding.round(prorated_salary * rates.third_party_levy);
    let total = rounding.sum([
        employer_social_security,
        severance_fund,
        risk_insurance,
        third_party_levy,
    ]);

    Charges {
        employer_social_security,
        severance_fund,
        risk_insurance,
        third_party_levy,
        total,
    }
}

/// Provisions thirteenth salary, vacation, the vacation bonus and the
/// severance fund due on them.
pub fn compute_provisions(
    base_salary: Decimal,
    factors: &ProrationFactors,
    severance_fund_rate: Decimal,
    rounding: &RoundingConfig,
) -> Provisions {
    if !factors.provisioned {
        return Provisions::default();
    }

    let monthly_fraction = base_salary / Decimal::from(MONTHS_PER_YEAR);
    let thirteenth_salary = rounding.round(monthly_fraction * factors.thirteenth);
    let vacation = rounding.round(monthly_fraction * factors.vacation);
    let vacation_bonus = rounding.round(vacation / Decimal::from(3));
    let severance_fund_on_provisions =
        rounding.round((thirteenth_salary + vacation + vacation_bonus) * severance_fund_rate);
    let total = rounding.sum([
        thirteenth_salary,
        vacation,
        vacation_bonus,
        severance_fund_on_provisions,
    ]);

    Provisions {
        thirteenth_salary,
        vacation,
        vacation_bonus,
        severance_fund_on_provisions,
        total,
    }
}

/// Accrues a single competency of `[start, end_exclusive)`.
///
/// Returns `None` when no day of the interval falls in the month.
pub fn accrue_month(
    base_salary: Decimal,
    start: NaiveDate,
    end_exclusive: NaiveDate,
    year: i32,
    month: u32,
    config: &CalculationConfig,
) -> Option<CompetencyMonth> {
    let basis = config.day_count_basis;
    let days_in_month = days_in_month(year, month, basis);
    let days_worked = worked_days_under_basis(start, end_exclusive, year, month, basis);
    if days_worked == 0 {
        return None;
    }

    let rounding = &config.rounding;
    let factors = proration_factors(days_worked, days_in_month, config);
    let prorated_salary = rounding.round(base_salary * factors.salary);
    let charges = compute_charges(prorated_salary, &config.rates, rounding);
    let provisions = compute_provisions(base_salary, &factors, config.rates.severance_fund, rounding);
    let month_total = rounding.round(charges.total + provisions.total);
    let total_cost = rounding.round(month_total + prorated_salary);

    debug!(
        year,
        month,
        days_worked,
        days_in_month,
        prorated_salary = %prorated_salary,
        month_total = %month_total,
        "Accrued competency"
    );

    Some(CompetencyMonth {
        year,
        month,
        days_in_month,
        days_worked,
        salary_factor: factors.salary,
        provisions_factor: factors.thirteenth,
        prorated_salary,
        charges,
        provisions,
        month_total,
        total_cost,
        is_fully_provisioned: factors.provisioned,
    })
}

/// Accrues every competency of an already-validated interval.
pub(crate) fn accrue_months(
    base_salary: Decimal,
    start: NaiveDate,
    end_exclusive: NaiveDate,
    config: &CalculationConfig,
) -> Vec<CompetencyMonth> {
    CompetencyCursor::new(start, end_exclusive)
        .filter_map(|(year, month)| accrue_month(base_salary, start, end_exclusive, year, month, config))
        .collect()
}

/// Aggregates competencies into period totals.
pub fn aggregate_totals(months: &[CompetencyMonth], rounding: &RoundingConfig) -> PeriodTotals {
    let salary = rounding.sum(months.iter().map(|m| m.prorated_salary));
    let charges = rounding.sum(months.iter().map(|m| m.charges.total));
    let provisions = rounding.sum(months.iter().map(|m| m.provisions.total));
    let grand_total = rounding.round(charges + provisions);

    PeriodTotals {
        salary,
        charges,
        provisions,
        grand_total,
    }
}

/// Computes the month-by-month accrual of an employment period.
///
/// An open-ended period runs up to today's UTC date; see
/// [`compute_accrual_period_as_of`] to pin the reference date.
///
/// # Errors
///
/// - [`EngineError::InvalidInterval`](crate::error::EngineError::InvalidInterval) if the end precedes the start
/// - [`EngineError::InvalidSalary`](crate::error::EngineError::InvalidSalary) if the base salary is not positive
/// - [`EngineError::InvalidConfig`](crate::error::EngineError::InvalidConfig) if the configuration is unusable
pub fn compute_accrual_period(
    period: &EmploymentPeriod,
    config: &CalculationConfig,
) -> EngineResult<PeriodReport> {
    compute_accrual_period_as_of(period, config, Utc::now().date_naive())
}

/// [`compute_accrual_period`] with an explicit reference date for open periods.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::compute_accrual_period_as_of;
/// use labor_cost_engine::config::CalculationConfig;
/// use labor_cost_engine::models::EmploymentPeriod;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = EmploymentPeriod::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()),
///     Decimal::new(10000, 0),
/// );
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let report = compute_accrual_period_as_of(&period, &CalculationConfig::default(), today).unwrap();
///
/// assert_eq!(report.months.len(), 1);
/// assert_eq!(report.totals.charges, Decimal::new(3580, 0));
/// ```
pub fn compute_accrual_period_as_of(
    period: &EmploymentPeriod,
    config: &CalculationConfig,
    today: NaiveDate,
) -> EngineResult<PeriodReport> {
    config.validate()?;
    let end = period.validate(today)?;
    let end_exclusive = exclusive_end(end, config.inclusive_end);

    let months = accrue_months(period.base_salary, period.start_date, end_exclusive, config);
    let totals = aggregate_totals(&months, &config.rounding);

    debug!(
        start = %period.start_date,
        end = %end,
        competencies = months.len(),
        grand_total = %totals.grand_total,
        "Accrual period computed"
    );

    Ok(PeriodReport { months, totals })
}
