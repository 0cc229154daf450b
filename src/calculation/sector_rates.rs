//! Charge rates by sector.
//!
//! Risk insurance varies between 1% and 3% with the sector's risk class;
//! rural employers also pay a reduced third-party levy. Sectors missing from
//! the table, and [`Sector::Unlisted`] codes, resolve to the default sector.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::ChargeRates;
use crate::error::{EngineError, EngineResult};
use crate::models::Sector;

/// The outcome of a sector lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorRates {
    /// The rates to apply.
    pub rates: ChargeRates,
    /// The sector those rates belong to.
    pub rated_sector: Sector,
    /// Whether the requested sector fell back to the default.
    pub fell_back: bool,
}

/// Maps sectors to charge rates, with a designated default sector.
///
/// # Example
///
/// ```
/// use labor_cost_engine::calculation::SectorRateTable;
/// use labor_cost_engine::models::Sector;
/// use rust_decimal::Decimal;
///
/// let table = SectorRateTable::reference();
/// let construction = table.rates_for(&Sector::Construction);
/// assert_eq!(construction.rates.risk_insurance, Decimal::new(3, 2));
///
/// let unknown = table.rates_for(&Sector::parse("mining"));
/// assert!(unknown.fell_back);
/// assert_eq!(unknown.rated_sector, Sector::Services);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorRateTable {
    default_sector: Sector,
    sectors: HashMap<Sector, ChargeRates>,
}

impl SectorRateTable {
    /// Builds a table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if a key is not a listed sector,
    /// if the default sector has no rates, or if any rate is negative.
    pub fn new(default_sector: Sector, sectors: HashMap<Sector, ChargeRates>) -> EngineResult<Self> {
        if let Some(unlisted) = sectors.keys().find(|sector| !sector.is_listed()) {
            return Err(EngineError::InvalidConfig {
                field: format!("sectors.{}", unlisted),
                message: "not a known sector".to_string(),
            });
        }
        if !sectors.contains_key(&default_sector) {
            return Err(EngineError::InvalidConfig {
                field: "default_sector".to_string(),
                message: format!("no rates configured for '{}'", default_sector),
            });
        }
        for (sector, rates) in &sectors {
            let negative = [
                rates.employer_social_security,
                rates.severance_fund,
                rates.risk_insurance,
                rates.third_party_levy,
            ]
            .iter()
            .any(|rate| *rate < Decimal::ZERO);
            if negative {
                return Err(EngineError::InvalidConfig {
                    field: format!("sectors.{}", sector),
                    message: "rates must not be negative".to_string(),
                });
            }
        }
        Ok(Self {
            default_sector,
            sectors,
        })
    }

    /// The reference table: services is the default sector.
    pub fn reference() -> Self {
        let standard = ChargeRates::default();
        let sectors = HashMap::from([
            (
                Sector::Commerce,
                ChargeRates {
                    risk_insurance: Decimal::new(1, 2),
                    ..standard
                },
            ),
            (Sector::Services, standard),
            (Sector::Industry, standard),
            (
                Sector::Construction,
                ChargeRates {
                    risk_insurance: Decimal::new(3, 2),
                    ..standard
                },
            ),
            (
                Sector::Rural,
                ChargeRates {
                    risk_insurance: Decimal::new(25, 3),
                    third_party_levy: Decimal::new(25, 3),
                    ..standard
                },
            ),
        ]);
        Self {
            default_sector: Sector::Services,
            sectors,
        }
    }

    /// The sector used for fallback.
    pub fn default_sector(&self) -> &Sector {
        &self.default_sector
    }

    /// Looks up the rates for a sector, falling back to the default sector.
    pub fn rates_for(&self, sector: &Sector) -> SectorRates {
        let listed = match sector {
            Sector::Unlisted(_) => None,
            listed => self.sectors.get(listed).map(|rates| (listed, rates)),
        };

        match listed {
            Some((listed, rates)) => SectorRates {
                rates: *rates,
                rated_sector: listed.clone(),
                fell_back: false,
            },
            None => {
                warn!(
                    sector = %sector,
                    default_sector = %self.default_sector,
                    "Sector has no configured rates, using default sector"
                );
                SectorRates {
                    rates: self.default_rates(),
                    rated_sector: self.default_sector.clone(),
                    fell_back: true,
                }
            }
        }
    }

    fn default_rates(&self) -> ChargeRates {
        // The constructor guarantees the default sector is present.
        self.sectors
            .get(&self.default_sector)
            .copied()
            .unwrap_or_default()
    }
}

impl Default for SectorRateTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_risk_insurance_by_sector() {
        let table = SectorRateTable::reference();
        assert_eq!(table.rates_for(&Sector::Commerce).rates.risk_insurance, dec("0.01"));
        assert_eq!(table.rates_for(&Sector::Services).rates.risk_insurance, dec("0.02"));
        assert_eq!(table.rates_for(&Sector::Industry).rates.risk_insurance, dec("0.02"));
        assert_eq!(table.rates_for(&Sector::Construction).rates.risk_insurance, dec("0.03"));
        assert_eq!(table.rates_for(&Sector::Rural).rates.risk_insurance, dec("0.025"));
    }

    #[test]
    fn test_other_components_are_sector_invariant_except_rural_levy() {
        let table = SectorRateTable::reference();
        for sector in Sector::listed() {
            let rates = table.rates_for(&sector).rates;
            assert_eq!(rates.employer_social_security, dec("0.20"));
            assert_eq!(rates.severance_fund, dec("0.08"));
            let expected_levy = if sector == Sector::Rural { "0.025" } else { "0.058" };
            assert_eq!(rates.third_party_levy, dec(expected_levy));
        }
    }

    #[test]
    fn test_listed_sector_does_not_fall_back() {
        let table = SectorRateTable::reference();
        let lookup = table.rates_for(&Sector::Construction);
        assert!(!lookup.fell_back);
        assert_eq!(lookup.rated_sector, Sector::Construction);
    }

    #[test]
    fn test_unlisted_sector_falls_back_to_default() {
        let table = SectorRateTable::reference();
        let lookup = table.rates_for(&Sector::parse("aerospace"));
        assert!(lookup.fell_back);
        assert_eq!(lookup.rated_sector, Sector::Services);
        assert_eq!(lookup.rates, ChargeRates::default());
    }

    #[test]
    fn test_listed_sector_missing_from_table_falls_back() {
        let table = SectorRateTable::new(
            Sector::Commerce,
            HashMap::from([(Sector::Commerce, ChargeRates::default())]),
        )
        .unwrap();
        let lookup = table.rates_for(&Sector::Rural);
        assert!(lookup.fell_back);
        assert_eq!(lookup.rated_sector, Sector::Commerce);
    }

    #[test]
    fn test_new_rejects_missing_default() {
        let result = SectorRateTable::new(
            Sector::Rural,
            HashMap::from([(Sector::Commerce, ChargeRates::default())]),
        );
        match result {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "default_sector"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_unlisted_keys() {
        let result = SectorRateTable::new(
            Sector::Commerce,
            HashMap::from([
                (Sector::Commerce, ChargeRates::default()),
                (Sector::parse("mining"), ChargeRates::default()),
            ]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_negative_rates() {
        let result = SectorRateTable::new(
            Sector::Commerce,
            HashMap::from([(
                Sector::Commerce,
                ChargeRates {
                    risk_insurance: dec("-0.01"),
                    ..ChargeRates::default()
                },
            )]),
        );
        assert!(result.is_err());
    }
}
