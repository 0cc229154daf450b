//! Configuration types for labor-cost calculations.
//!
//! This module contains the strongly-typed configuration structures that
//! drive every calculation. They are deserialized from YAML configuration
//! files, but callers may equally build them in code and pass them by value.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::SectorRateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::Sector;

/// Upper bound on rounding scale supported by [`Decimal`].
pub const MAX_ROUNDING_DECIMALS: u32 = 28;

/// How ties are resolved when rounding a monetary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Banker's rounding: ties go to the even neighbour.
    #[default]
    #[serde(alias = "half-even")]
    HalfEven,
    /// Ties go away from zero.
    #[serde(alias = "half-up")]
    HalfUp,
}

/// Rounding scale and tie-breaking mode applied to every monetary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingConfig {
    /// Number of decimal places kept.
    pub decimals: u32,
    /// Tie-breaking mode.
    pub mode: RoundingMode,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            mode: RoundingMode::HalfEven,
        }
    }
}

/// Day-count convention used to size a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCountBasis {
    /// True Gregorian length of the month.
    #[default]
    Calendar,
    /// Every month normalized to 30 days.
    #[serde(alias = "commercial_30")]
    Commercial30,
}

/// How provisions accrue over a partial competency and how settlement
/// vacation is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationMethod {
    /// One twelfth of the salary per competency.
    #[default]
    MonthlyFraction,
    /// Proportional to days worked over a 365-day year.
    DailyFraction,
}

/// Charge percentages applied to the prorated salary.
///
/// Rates are fractions, so `0.20` means twenty percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRates {
    /// Employer social security contribution (INSS patronal).
    pub employer_social_security: Decimal,
    /// Severance fund deposit (FGTS).
    pub severance_fund: Decimal,
    /// Work-accident risk insurance (RAT), 1% to 3% by sector risk class.
    pub risk_insurance: Decimal,
    /// Third-party levies (Sistema S, SENAR).
    pub third_party_levy: Decimal,
}

impl ChargeRates {
    /// Sum of all four rates.
    pub fn combined(&self) -> Decimal {
        self.employer_social_security
            + self.severance_fund
            + self.risk_insurance
            + self.third_party_levy
    }

    fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("rates.employer_social_security", self.employer_social_security),
            ("rates.severance_fund", self.severance_fund),
            ("rates.risk_insurance", self.risk_insurance),
            ("rates.third_party_levy", self.third_party_levy),
        ];
        for (field, rate) in fields {
            if rate < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", rate),
                });
            }
        }
        Ok(())
    }
}

impl Default for ChargeRates {
    fn default() -> Self {
        Self {
            employer_social_security: Decimal::new(20, 2),
            severance_fund: Decimal::new(8, 2),
            risk_insurance: Decimal::new(2, 2),
            third_party_levy: Decimal::new(58, 3),
        }
    }
}

/// Policy parameters for one calculation.
///
/// Owned by the caller and passed by value or reference into each
/// computation; the engine keeps no copy between calls. Missing fields in a
/// serialized config take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    /// Charge percentages.
    pub rates: ChargeRates,
    /// Whether partial competencies accrue thirteenth and vacation.
    pub provision_partial_month: bool,
    /// Month sizing convention.
    pub day_count_basis: DayCountBasis,
    /// Vacation accrual method.
    pub vacation_method: VacationMethod,
    /// Whether the end date itself is a worked day.
    pub inclusive_end: bool,
    /// Whether a competency needs 15 worked days to count toward proportional
    /// thirteenth and vacation at termination.
    pub fifteen_day_rule: bool,
    /// Rounding applied to every monetary value.
    pub rounding: RoundingConfig,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            rates: ChargeRates::default(),
            provision_partial_month: true,
            day_count_basis: DayCountBasis::Calendar,
            vacation_method: VacationMethod::MonthlyFraction,
            inclusive_end: true,
            fifteen_day_rule: true,
            rounding: RoundingConfig::default(),
        }
    }
}

impl CalculationConfig {
    /// Flat-rate estimation preset: every month counts as 30 days.
    pub fn estimate() -> Self {
        Self {
            day_count_basis: DayCountBasis::Commercial30,
            ..Self::default()
        }
    }

    /// Returns a copy using the given charge rates.
    pub fn with_rates(&self, rates: ChargeRates) -> Self {
        Self {
            rates,
            ..self.clone()
        }
    }

    /// Checks that the configuration can be applied.
    ///
    /// Rejects negative rates and rounding scales beyond what [`Decimal`]
    /// can represent.
    pub fn validate(&self) -> EngineResult<()> {
        self.rates.validate()?;
        if self.rounding.decimals > MAX_ROUNDING_DECIMALS {
            return Err(EngineError::InvalidConfig {
                field: "rounding.decimals".to_string(),
                message: format!(
                    "must be at most {}, got {}",
                    MAX_ROUNDING_DECIMALS, self.rounding.decimals
                ),
            });
        }
        Ok(())
    }
}

/// Metadata about a configuration set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the configuration.
    pub name: String,
    /// Version or effective date of the configuration.
    pub version: String,
    /// Jurisdiction the rates belong to (e.g. "BR").
    pub jurisdiction: String,
}

/// Structure of `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Configuration metadata.
    pub metadata: EngineMetadata,
    /// Default calculation parameters.
    #[serde(default)]
    pub calculation: CalculationConfig,
}

/// Structure of `sectors.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SectorsFile {
    /// Sector whose rates apply when a sector has none configured.
    pub default_sector: Sector,
    /// Charge rates per sector.
    pub sectors: HashMap<Sector, ChargeRates>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    defaults: CalculationConfig,
    sectors: SectorRateTable,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        defaults: CalculationConfig,
        sectors: SectorRateTable,
    ) -> Self {
        Self {
            metadata,
            defaults,
            sectors,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the default calculation parameters.
    pub fn defaults(&self) -> &CalculationConfig {
        &self.defaults
    }

    /// Returns the sector rate table.
    pub fn sectors(&self) -> &SectorRateTable {
        &self.sectors
    }
}
