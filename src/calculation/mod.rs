//! Calculation logic for the Labor Cost Engine.
//!
//! This module contains the pure functions that turn an employment period
//! into costs: monetary rounding, calendar arithmetic over competencies,
//! sector rate lookup, the month-by-month accrual of charges and provisions,
//! the termination settlement, and the combined cost report.

mod accrual;
mod date_interval;
mod report;
mod rounding;
mod sector_rates;
mod severance;

pub use accrual::{
    DAYS_PER_YEAR, MONTHS_PER_YEAR, ProrationFactors, accrue_month, aggregate_totals,
    compute_accrual_period, compute_accrual_period_as_of, compute_charges, compute_provisions,
    proration_factors,
};
pub use date_interval::{
    COMMERCIAL_MONTH_DAYS, CompetencyCursor, days_in_month, exclusive_end, overlap_days,
    step_to_next_month, worked_days_under_basis,
};
pub use report::{
    ENGINE_VERSION, PERCENTAGE_DECIMALS, accumulate_charges, accumulate_provisions,
    compute_cost_report, compute_cost_report_as_of, compute_cost_totals, count_full_months,
};
pub use rounding::{decimal_from_f64, round, round_f64, sum_rounded, sum_rounded_f64};
pub use sector_rates::{SectorRateTable, SectorRates};
pub use severance::{
    BASE_NOTICE_DAYS, FIFTEEN_DAY_THRESHOLD, MAX_NOTICE_DAYS, NOTICE_DAYS_PER_YEAR,
    NOTICE_MONTH_DAYS, QualifyingMonths, compute_severance, compute_severance_as_of,
    count_qualifying_months, includes_notice_indemnity, notice_days, termination_fine_rate,
};
