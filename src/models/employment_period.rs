//! Employment period, sector and termination models.
//!
//! This module contains the [`EmploymentPeriod`] input type together with the
//! [`Sector`] classification that selects charge rates and the
//! [`TerminationType`] that selects termination-specific amounts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Economic sector of the employer, used to pick charge rates.
///
/// Sector classification is advisory: any code that is not recognised maps to
/// [`Sector::Unlisted`], which the rate table resolves to its default sector
/// instead of rejecting the calculation. Portuguese codes are accepted as
/// aliases.
///
/// # Example
///
/// ```
/// use labor_cost_engine::models::Sector;
///
/// assert_eq!(Sector::parse("construction"), Sector::Construction);
/// assert_eq!(Sector::parse("Construcao"), Sector::Construction);
/// assert_eq!(Sector::parse("mining"), Sector::Unlisted("mining".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sector {
    /// Retail and wholesale trade (low risk).
    Commerce,
    /// Services (medium risk).
    #[default]
    Services,
    /// Manufacturing (medium risk).
    Industry,
    /// Civil construction (high risk).
    Construction,
    /// Rural activity, levied through SENAR.
    Rural,
    /// Any code outside the known classification, kept verbatim.
    Unlisted(String),
}

impl Sector {
    /// Every listed sector, in display order.
    pub fn listed() -> [Sector; 5] {
        [
            Sector::Commerce,
            Sector::Services,
            Sector::Industry,
            Sector::Construction,
            Sector::Rural,
        ]
    }

    /// Parses a sector code, case-insensitively.
    pub fn parse(code: &str) -> Self {
        let normalized = code.trim().to_lowercase();
        match normalized.as_str() {
            "commerce" | "comercio" => Sector::Commerce,
            "services" | "servicos" => Sector::Services,
            "industry" | "industria" => Sector::Industry,
            "construction" | "construcao" => Sector::Construction,
            "rural" => Sector::Rural,
            _ => Sector::Unlisted(code.trim().to_string()),
        }
    }

    /// Canonical code of this sector.
    pub fn code(&self) -> &str {
        match self {
            Sector::Commerce => "commerce",
            Sector::Services => "services",
            Sector::Industry => "industry",
            Sector::Construction => "construction",
            Sector::Rural => "rural",
            Sector::Unlisted(code) => code,
        }
    }

    /// Returns `true` unless this is [`Sector::Unlisted`].
    pub fn is_listed(&self) -> bool {
        !matches!(self, Sector::Unlisted(_))
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<String> for Sector {
    fn from(code: String) -> Self {
        Sector::parse(&code)
    }
}

impl From<Sector> for String {
    fn from(sector: Sector) -> Self {
        sector.code().to_string()
    }
}

/// How the employment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationType {
    /// Dismissal without just cause (demissão sem justa causa).
    #[serde(alias = "demissaoSemJusta")]
    UnjustDismissal,
    /// Dismissal with just cause (demissão por justa causa).
    #[serde(alias = "demissaoComJusta")]
    JustCauseDismissal,
    /// Resignation by the employee (pedido de demissão).
    #[serde(alias = "pedidoDemissao")]
    Resignation,
    /// Termination by mutual agreement (acordo, CLT art. 484-A).
    #[serde(alias = "acordoTrabalhista")]
    MutualAgreement,
    /// Fixed-term contract reached its end.
    #[default]
    #[serde(alias = "termino")]
    ContractEnd,
    /// Retirement.
    #[serde(alias = "aposentadoria")]
    Retirement,
}

/// Largest monthly base salary accepted, one billion.
///
/// Keeps every sum over a period well inside `Decimal` range.
pub const MAX_BASE_SALARY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// One employment interval as supplied by the caller.
///
/// Immutable for the duration of a calculation. An absent `end_date` means
/// the employment is still open and is evaluated up to the reference date.
///
/// # Example
///
/// ```
/// use labor_cost_engine::models::{EmploymentPeriod, Sector, TerminationType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = EmploymentPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     Some(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()),
///     Decimal::new(5000, 0),
/// )
/// .with_sector(Sector::Services)
/// .with_termination(TerminationType::UnjustDismissal);
///
/// assert!(period.validate(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentPeriod {
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment, if it has ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Employer sector.
    #[serde(default)]
    pub sector: Sector,
    /// How the employment ended, if it has.
    #[serde(default)]
    pub termination_type: Option<TerminationType>,
}

impl EmploymentPeriod {
    /// Creates a period in the default sector with no termination type.
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>, base_salary: Decimal) -> Self {
        Self {
            start_date,
            end_date,
            base_salary,
            sector: Sector::default(),
            termination_type: None,
        }
    }

    /// Sets the sector.
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sector = sector;
        self
    }

    /// Sets the termination type.
    pub fn with_termination(mut self, termination_type: TerminationType) -> Self {
        self.termination_type = Some(termination_type);
        self
    }

    /// The end date, or `today` for an open-ended period.
    pub fn resolved_end(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(today)
    }

    /// Validates the period and returns its resolved end date.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInterval`] if the resolved end precedes the start
    /// - [`EngineError::InvalidSalary`] if the base salary is not positive or
    ///   exceeds [`MAX_BASE_SALARY`]
    pub fn validate(&self, today: NaiveDate) -> EngineResult<NaiveDate> {
        let end = self.resolved_end(today);
        if end < self.start_date {
            return Err(EngineError::InvalidInterval {
                start: self.start_date,
                end,
            });
        }
        if self.base_salary <= Decimal::ZERO || self.base_salary > MAX_BASE_SALARY {
            return Err(EngineError::InvalidSalary {
                salary: self.base_salary,
            });
        }
        Ok(end)
    }
}
