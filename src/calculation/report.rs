//! Cost report assembly.
//!
//! Combines the accrual walk and the severance settlement of one employment
//! period into a single [`CostReport`], with the charge rates resolved from
//! the employee's sector.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{CalculationConfig, DayCountBasis, RoundingConfig, RoundingMode};
use crate::error::EngineResult;
use crate::models::{
    Advisory, Charges, CompetencyMonth, CostReport, CostTotals, EmployeeSummary,
    EmploymentPeriod, Provisions, Sector, SeveranceResult, TerminationType,
};

use super::accrual::{accrue_months, aggregate_totals};
use super::date_interval::{CompetencyCursor, days_in_month, exclusive_end, overlap_days};
use super::rounding::round;
use super::sector_rates::SectorRateTable;
use super::severance::compute_severance_as_of;

/// Version stamped on every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal places of [`CostTotals::charges_percentage`].
pub const PERCENTAGE_DECIMALS: u32 = 1;

/// Calendar months of `[start, end_exclusive)` covered from first to last day.
pub fn count_full_months(start: NaiveDate, end_exclusive: NaiveDate) -> u32 {
    CompetencyCursor::new(start, end_exclusive)
        .filter(|&(year, month)| {
            let calendar = days_in_month(year, month, DayCountBasis::Calendar);
            calendar > 0 && overlap_days(start, end_exclusive, year, month) == calendar
        })
        .count() as u32
}

/// Sums each charge component across competencies.
pub fn accumulate_charges(months: &[CompetencyMonth], rounding: &RoundingConfig) -> Charges {
    Charges {
        employer_social_security: rounding.sum(months.iter().map(|m| m.charges.employer_social_security)),
        severance_fund: rounding.sum(months.iter().map(|m| m.charges.severance_fund)),
        risk_insurance: rounding.sum(months.iter().map(|m| m.charges.risk_insurance)),
        third_party_levy: rounding.sum(months.iter().map(|m| m.charges.third_party_levy)),
        total: rounding.sum(months.iter().map(|m| m.charges.total)),
    }
}

/// Sums each provision component across competencies.
pub fn accumulate_provisions(months: &[CompetencyMonth], rounding: &RoundingConfig) -> Provisions {
    Provisions {
        thirteenth_salary: rounding.sum(months.iter().map(|m| m.provisions.thirteenth_salary)),
        vacation: rounding.sum(months.iter().map(|m| m.provisions.vacation)),
        vacation_bonus: rounding.sum(months.iter().map(|m| m.provisions.vacation_bonus)),
        severance_fund_on_provisions: rounding
            .sum(months.iter().map(|m| m.provisions.severance_fund_on_provisions)),
        total: rounding.sum(months.iter().map(|m| m.provisions.total)),
    }
}

/// Computes the headline totals of a report.
///
/// `competencies` is floored at one for the monthly average. The charges
/// percentage always rounds half up to one decimal place, and is zero when no
/// salary was paid.
pub fn compute_cost_totals(
    salaries_paid: Decimal,
    mandatory_charges: Decimal,
    provisions: Decimal,
    severance: &SeveranceResult,
    competencies: usize,
    rounding: &RoundingConfig,
) -> CostTotals {
    let termination_cost = severance.settlement_total;
    let estimated_total_cost = rounding.sum([salaries_paid, mandatory_charges, termination_cost]);
    let average_monthly_cost =
        rounding.round(estimated_total_cost / Decimal::from(competencies.max(1)));
    let charges_percentage = if salaries_paid.is_zero() {
        Decimal::ZERO
    } else {
        round(
            (mandatory_charges + termination_cost) / salaries_paid * Decimal::ONE_HUNDRED,
            PERCENTAGE_DECIMALS,
            RoundingMode::HalfUp,
        )
    };

    CostTotals {
        salaries_paid,
        mandatory_charges,
        provisions,
        termination_cost,
        estimated_total_cost,
        average_monthly_cost,
        charges_percentage,
    }
}

fn report_advisories(
    severance: &SeveranceResult,
    sector: &Sector,
    rated_sector: &Sector,
    fell_back: bool,
    full_months: u32,
    totals: &CostTotals,
) -> Vec<Advisory> {
    let mut advisories = severance.advisories.clone();

    if full_months == 0 {
        advisories.push(Advisory::notice(
            "NO_FULL_MONTH",
            "No calendar month was worked in full; every competency is prorated",
        ));
    }
    if totals.charges_percentage > Decimal::ONE_HUNDRED {
        advisories.push(Advisory::notice(
            "CHARGES_EXCEED_SALARY",
            format!(
                "Charges and termination cost amount to {}% of salaries paid",
                totals.charges_percentage
            ),
        ));
    }
    if *rated_sector == Sector::Construction {
        advisories.push(Advisory::info(
            "MAX_RISK_RATE",
            "Construction sector carries the highest risk insurance rate",
        ));
    }
    if fell_back {
        advisories.push(Advisory::notice(
            "UNKNOWN_SECTOR",
            format!(
                "No rates configured for sector '{}', used '{}' rates",
                sector, rated_sector
            ),
        ));
    }

    advisories
}

/// Builds the full cost report of an employment period.
///
/// The period's sector selects the charge rates from `sectors`; these replace
/// the rates in `config` for both the accrual and the settlement. An open
/// period runs up to today's UTC date; see [`compute_cost_report_as_of`].
///
/// # Errors
///
/// Same input errors as
/// [`compute_accrual_period`](super::compute_accrual_period).
pub fn compute_cost_report(
    period: &EmploymentPeriod,
    config: &CalculationConfig,
    sectors: &SectorRateTable,
) -> EngineResult<CostReport> {
    compute_cost_report_as_of(period, config, sectors, Utc::now().date_naive())
}

/// [`compute_cost_report`] with an explicit reference date for open periods.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::{SectorRateTable, compute_cost_report_as_of};
/// use labor_cost_engine::config::CalculationConfig;
/// use labor_cost_engine::models::{EmploymentPeriod, Sector};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = EmploymentPeriod::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     Some(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
///     Decimal::new(4000, 0),
/// )
/// .with_sector(Sector::Commerce);
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
///
/// let report = compute_cost_report_as_of(
///     &period,
///     &CalculationConfig::default(),
///     &SectorRateTable::reference(),
///     today,
/// )
/// .unwrap();
///
/// assert_eq!(report.employee.full_months, 3);
/// assert_eq!(report.totals.salaries_paid, Decimal::new(12000, 0));
/// ```
pub fn compute_cost_report_as_of(
    period: &EmploymentPeriod,
    config: &CalculationConfig,
    sectors: &SectorRateTable,
    today: NaiveDate,
) -> EngineResult<CostReport> {
    let lookup = sectors.rates_for(&period.sector);
    let config = config.with_rates(lookup.rates);
    config.validate()?;
    let end = period.validate(today)?;
    let end_exclusive = exclusive_end(end, config.inclusive_end);
    let rounding = &config.rounding;

    let months = accrue_months(period.base_salary, period.start_date, end_exclusive, &config);
    let period_totals = aggregate_totals(&months, rounding);
    let severance = compute_severance_as_of(period, &config, today)?;

    let full_months = count_full_months(period.start_date, end_exclusive);
    let days_worked = ((end - period.start_date).num_days() + 1) as u32;

    let totals = compute_cost_totals(
        period_totals.salary,
        period_totals.charges,
        period_totals.provisions,
        &severance,
        months.len(),
        rounding,
    );
    let advisories = report_advisories(
        &severance,
        &period.sector,
        &lookup.rated_sector,
        lookup.fell_back,
        full_months,
        &totals,
    );

    let calculation_id = Uuid::new_v4();
    debug!(
        calculation_id = %calculation_id,
        competencies = months.len(),
        full_months,
        advisories = advisories.len(),
        "Cost report assembled"
    );
    info!(
        calculation_id = %calculation_id,
        sector = %lookup.rated_sector,
        estimated_total_cost = %totals.estimated_total_cost,
        "Cost report computed"
    );

    Ok(CostReport {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        employee: EmployeeSummary {
            start_date: period.start_date,
            end_date: end,
            base_salary: period.base_salary,
            sector: period.sector.clone(),
            rated_sector: lookup.rated_sector,
            termination_type: period.termination_type.unwrap_or(TerminationType::ContractEnd),
            days_worked,
            full_months,
        },
        accumulated_charges: accumulate_charges(&months, rounding),
        accumulated_provisions: accumulate_provisions(&months, rounding),
        months,
        severance,
        totals,
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2030, 1, 1)
    }

    fn codes(report: &CostReport) -> Vec<&str> {
        report.advisories.iter().map(|a| a.code.as_str()).collect()
    }

    fn report(period: &EmploymentPeriod) -> CostReport {
        compute_cost_report_as_of(
            period,
            &CalculationConfig::default(),
            &SectorRateTable::reference(),
            today(),
        )
        .unwrap()
    }

    #[test]
    fn test_year_in_construction_ending_in_unjust_dismissal() {
        let period = EmploymentPeriod::new(date(2025, 1, 1), Some(date(2025, 12, 31)), dec("5000"))
            .with_sector(Sector::Construction)
            .with_termination(TerminationType::UnjustDismissal);
        let report = report(&period);

        assert_eq!(report.months.len(), 12);
        assert_eq!(report.employee.days_worked, 365);
        assert_eq!(report.employee.full_months, 12);
        assert_eq!(report.employee.rated_sector, Sector::Construction);

        // 36.8% on 5000 every month
        assert_eq!(report.accumulated_charges.risk_insurance, dec("1800"));
        assert_eq!(report.accumulated_charges.total, dec("22080"));
        assert_eq!(report.accumulated_provisions.total, dec("12600.12"));

        assert_eq!(report.severance.total, dec("12600.00"));
        assert_eq!(report.severance.termination_fine, Some(dec("1920")));
        assert_eq!(report.severance.notice_days, Some(33));
        assert_eq!(report.severance.notice_indemnity, Some(dec("5500.00")));

        assert_eq!(report.totals.salaries_paid, dec("60000"));
        assert_eq!(report.totals.mandatory_charges, dec("22080"));
        assert_eq!(report.totals.termination_cost, dec("20020.00"));
        assert_eq!(report.totals.estimated_total_cost, dec("102100.00"));
        assert_eq!(report.totals.average_monthly_cost, dec("8508.33"));
        assert_eq!(report.totals.charges_percentage, dec("70.2"));

        assert_eq!(codes(&report), vec!["FINE_AND_NOTICE_INCLUDED", "MAX_RISK_RATE"]);
        assert_eq!(report.engine_version, ENGINE_VERSION);
    }

    #[test]
    fn test_unknown_sector_short_period() {
        let period = EmploymentPeriod::new(date(2025, 3, 10), Some(date(2025, 3, 20)), dec("3100"))
            .with_sector(Sector::parse("mining"));
        let report = report(&period);

        assert_eq!(report.employee.sector, Sector::parse("mining"));
        assert_eq!(report.employee.rated_sector, Sector::Services);
        assert_eq!(report.employee.termination_type, TerminationType::ContractEnd);
        assert_eq!(report.employee.days_worked, 11);
        assert_eq!(report.employee.full_months, 0);
        assert_eq!(report.totals.salaries_paid, dec("1100.00"));
        assert_eq!(report.totals.mandatory_charges, dec("393.80"));
        assert_eq!(report.totals.termination_cost, Decimal::ZERO);
        assert_eq!(report.totals.charges_percentage, dec("35.8"));
        assert_eq!(codes(&report), vec!["NO_FULL_MONTH", "UNKNOWN_SECTOR"]);
    }

    #[test]
    fn test_charges_exceeding_salary_are_flagged() {
        let period = EmploymentPeriod::new(date(2025, 1, 1), Some(date(2025, 1, 1)), dec("3100"))
            .with_termination(TerminationType::UnjustDismissal);
        let report = report(&period);

        assert!(report.totals.charges_percentage > dec("100"));
        let codes = codes(&report);
        assert!(codes.contains(&"CHARGES_EXCEED_SALARY"));
        assert!(codes.contains(&"NO_FULL_MONTH"));
    }

    #[test]
    fn test_sector_rates_replace_config_rates() {
        let period = EmploymentPeriod::new(date(2025, 1, 1), Some(date(2025, 1, 31)), dec("10000"))
            .with_sector(Sector::Commerce);
        let report = report(&period);
        assert_eq!(report.accumulated_charges.risk_insurance, dec("100"));
        assert_eq!(report.accumulated_charges.total, dec("3480"));
    }

    #[test]
    fn test_calculation_ids_are_unique() {
        let period = EmploymentPeriod::new(date(2025, 1, 1), Some(date(2025, 1, 31)), dec("10000"));
        assert_ne!(report(&period).calculation_id, report(&period).calculation_id);
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let period = EmploymentPeriod::new(date(2025, 2, 1), Some(date(2025, 1, 1)), dec("10000"));
        let result = compute_cost_report_as_of(
            &period,
            &CalculationConfig::default(),
            &SectorRateTable::reference(),
            today(),
        );
        assert!(matches!(result, Err(EngineError::InvalidInterval { .. })));
    }

    #[test]
    fn test_count_full_months() {
        assert_eq!(count_full_months(date(2025, 1, 1), date(2025, 4, 1)), 3);
        assert_eq!(count_full_months(date(2025, 1, 2), date(2025, 4, 1)), 2);
        assert_eq!(count_full_months(date(2025, 1, 2), date(2025, 3, 31)), 1);
        assert_eq!(count_full_months(date(2024, 2, 1), date(2024, 3, 1)), 1);
    }

    fn empty_severance() -> SeveranceResult {
        SeveranceResult {
            qualifying_months_for_thirteenth: 0,
            qualifying_months_for_vacation: 0,
            total_days_worked: 0,
            proportional_thirteenth: Decimal::ZERO,
            proportional_vacation: Decimal::ZERO,
            vacation_bonus: Decimal::ZERO,
            severance_fund_on_benefits: Decimal::ZERO,
            severance_fund_balance: Decimal::ZERO,
            termination_fine: None,
            notice_days: None,
            notice_indemnity: None,
            total: Decimal::ZERO,
            settlement_total: Decimal::ZERO,
            advisories: Vec::new(),
        }
    }

    #[test]
    fn test_totals_with_no_salary() {
        let totals = compute_cost_totals(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            &empty_severance(),
            0,
            &RoundingConfig::default(),
        );
        assert_eq!(totals.charges_percentage, Decimal::ZERO);
        assert_eq!(totals.average_monthly_cost, Decimal::ZERO);
    }

    #[test]
    fn test_charges_percentage_rounds_ties_up() {
        let half_even = RoundingConfig {
            decimals: 2,
            mode: RoundingMode::HalfEven,
        };
        // 70.25% is a tie at one decimal place
        let totals = compute_cost_totals(
            dec("100"),
            dec("70.25"),
            Decimal::ZERO,
            &empty_severance(),
            1,
            &half_even,
        );
        assert_eq!(totals.charges_percentage, dec("70.3"));
    }

    #[test]
    fn test_days_worked_counts_both_ends_with_exclusive_config() {
        let config = CalculationConfig {
            inclusive_end: false,
            ..CalculationConfig::default()
        };
        let period = EmploymentPeriod::new(date(2025, 1, 1), Some(date(2025, 1, 31)), dec("3100"));
        let report =
            compute_cost_report_as_of(&period, &config, &SectorRateTable::reference(), today())
                .unwrap();

        assert_eq!(report.employee.days_worked, 31);
        // The accrual walk itself stops before the end date
        assert_eq!(report.months[0].days_worked, 30);
        assert_eq!(report.employee.full_months, 0);
    }
}
