//! Calendar arithmetic over competencies.
//!
//! This module sizes months under a day-count basis, intersects an employment
//! interval with a month, and steps through the months an interval touches.
//! Dates are [`NaiveDate`] throughout, so no timezone or daylight-saving
//! boundary can shift a day. Intervals are half-open: the end is exclusive.

use chrono::{Datelike, NaiveDate};

use crate::config::DayCountBasis;

/// Length of every month under [`DayCountBasis::Commercial30`].
pub const COMMERCIAL_MONTH_DAYS: u32 = 30;

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns the first day of the month following `date`.
///
/// Returns `None` only past the last representable date.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::step_to_next_month;
/// use chrono::NaiveDate;
///
/// let next = step_to_next_month(NaiveDate::from_ymd_opt(2024, 12, 17).unwrap());
/// assert_eq!(next, NaiveDate::from_ymd_opt(2025, 1, 1));
/// ```
pub fn step_to_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        first_of_month(date.year() + 1, 1)
    } else {
        first_of_month(date.year(), date.month() + 1)
    }
}

/// Number of days in a month under the given basis.
///
/// Returns 0 for a month number outside 1 to 12.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::days_in_month;
/// use labor_cost_engine::config::DayCountBasis;
///
/// assert_eq!(days_in_month(2024, 2, DayCountBasis::Calendar), 29);
/// assert_eq!(days_in_month(2024, 2, DayCountBasis::Commercial30), 30);
/// ```
pub fn days_in_month(year: i32, month: u32, basis: DayCountBasis) -> u32 {
    let Some(first) = first_of_month(year, month) else {
        return 0;
    };
    match basis {
        DayCountBasis::Commercial30 => COMMERCIAL_MONTH_DAYS,
        DayCountBasis::Calendar => match step_to_next_month(first) {
            Some(next) => (next - first).num_days() as u32,
            // December of the last representable year
            None => 31,
        },
    }
}

/// Days of the half-open interval `[start, end_exclusive)` falling in the
/// given calendar month, or 0 when they do not overlap.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::overlap_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
/// assert_eq!(overlap_days(start, end, 2025, 1), 17);
/// assert_eq!(overlap_days(start, end, 2025, 2), 28);
/// assert_eq!(overlap_days(start, end, 2025, 3), 10);
/// assert_eq!(overlap_days(start, end, 2025, 4), 0);
/// ```
pub fn overlap_days(start: NaiveDate, end_exclusive: NaiveDate, year: i32, month: u32) -> u32 {
    let Some(month_start) = first_of_month(year, month) else {
        return 0;
    };
    let month_end = step_to_next_month(month_start).unwrap_or(NaiveDate::MAX);

    let from = start.max(month_start);
    let to = end_exclusive.min(month_end);
    if to <= from {
        return 0;
    }
    (to - from).num_days() as u32
}

/// Worked days of a competency measured under the given basis.
///
/// Under the commercial basis the calendar overlap is capped at 30, so a
/// 31-day month worked in full counts 30 while a full February keeps its 28.
pub fn worked_days_under_basis(
    start: NaiveDate,
    end_exclusive: NaiveDate,
    year: i32,
    month: u32,
    basis: DayCountBasis,
) -> u32 {
    let overlap = overlap_days(start, end_exclusive, year, month);
    match basis {
        DayCountBasis::Calendar => overlap,
        DayCountBasis::Commercial30 => overlap.min(COMMERCIAL_MONTH_DAYS),
    }
}

/// Converts a caller-supplied end date into the exclusive end used internally.
///
/// With `inclusive_end` the end date itself is a worked day, so the interval
/// runs to the following day.
pub fn exclusive_end(end: NaiveDate, inclusive_end: bool) -> NaiveDate {
    if inclusive_end {
        end.succ_opt().unwrap_or(NaiveDate::MAX)
    } else {
        end
    }
}

/// Iterator over the `(year, month)` competencies touched by `[start, end_exclusive)`.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::CompetencyCursor;
/// use chrono::NaiveDate;
///
/// let months: Vec<_> = CompetencyCursor::new(
///     NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
/// )
/// .collect();
/// assert_eq!(months, vec![(2024, 11), (2024, 12), (2025, 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct CompetencyCursor {
    next: Option<NaiveDate>,
    end_exclusive: NaiveDate,
}

impl CompetencyCursor {
    /// Creates a cursor positioned at the month containing `start`.
    pub fn new(start: NaiveDate, end_exclusive: NaiveDate) -> Self {
        Self {
            next: first_of_month(start.year(), start.month()),
            end_exclusive,
        }
    }
}

impl Iterator for CompetencyCursor {
    type Item = (i32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|month| *month < self.end_exclusive)?;
        self.next = step_to_next_month(current);
        Some((current.year(), current.month()))
    }
}
