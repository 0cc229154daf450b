//! Core data models for the labor-cost engine.
//!
//! This module contains all the domain models used throughout the engine.

mod competency;
mod cost_report;
mod employment_period;
mod severance;

pub use competency::{Charges, CompetencyMonth, PeriodReport, PeriodTotals, Provisions};
pub use cost_report::{Advisory, AdvisorySeverity, CostReport, CostTotals, EmployeeSummary};
pub use employment_period::{EmploymentPeriod, MAX_BASE_SALARY, Sector, TerminationType};
pub use severance::SeveranceResult;
