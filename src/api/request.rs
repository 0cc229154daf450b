//! Request types for the Labor Cost Engine API.
//!
//! This module defines the JSON request structure shared by the `/accrual`,
//! `/severance` and `/report` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::SectorRateTable;
use crate::config::CalculationConfig;
use crate::models::{EmploymentPeriod, Sector, TerminationType};

/// Request body for the calculation endpoints.
///
/// When `config` is present it replaces the engine defaults entirely; fields
/// it omits take [`CalculationConfig::default`] values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employment period to cost.
    pub employment: EmploymentRequest,
    /// Optional calculation parameters.
    #[serde(default)]
    pub config: Option<CalculationConfig>,
}

/// Employment information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentRequest {
    /// The first day of employment.
    pub start_date: NaiveDate,
    /// The last day of employment; omitted for ongoing employment.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Economic sector code.
    #[serde(default)]
    pub sector: Sector,
    /// How the employment ended.
    #[serde(default)]
    pub termination_type: Option<TerminationType>,
}

impl CalculationRequest {
    /// Resolves the calculation parameters for this request.
    ///
    /// Without an explicit config the engine defaults apply, with the charge
    /// rates of the employee's sector.
    pub fn resolve_config(
        &self,
        defaults: &CalculationConfig,
        sectors: &SectorRateTable,
    ) -> CalculationConfig {
        match &self.config {
            Some(config) => config.clone(),
            None => defaults.with_rates(sectors.rates_for(&self.employment.sector).rates),
        }
    }
}

impl From<EmploymentRequest> for EmploymentPeriod {
    fn from(req: EmploymentRequest) -> Self {
        EmploymentPeriod {
            start_date: req.start_date,
            end_date: req.end_date,
            base_salary: req.base_salary,
            sector: req.sector,
            termination_type: req.termination_type,
        }
    }
}
