//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::calculation::SectorRateTable;
use crate::error::{EngineError, EngineResult};

use super::types::{CalculationConfig, EngineConfig, EngineFile, EngineMetadata, SectorsFile};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them, and exposes the default calculation parameters and the
/// sector rate table.
///
/// # Directory Structure
///
/// ```text
/// config/reference/
/// ├── engine.yaml   # Metadata and default calculation parameters
/// └── sectors.yaml  # Charge rates per sector and the default sector
/// ```
///
/// # Example
///
/// ```no_run
/// use labor_cost_engine::config::ConfigLoader;
/// use labor_cost_engine::models::Sector;
///
/// let loader = ConfigLoader::load("./config/reference").unwrap();
///
/// let rates = loader.sectors().rates_for(&Sector::Construction);
/// println!("Construction risk insurance: {}", rates.rates.risk_insurance);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if a required file is missing
    /// - [`EngineError::ConfigParseError`] if a file contains invalid YAML or
    ///   is missing required fields
    /// - [`EngineError::InvalidConfig`] if the parsed values are unusable
    ///
    /// # Example
    ///
    /// ```no_run
    /// use labor_cost_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/reference")?;
    /// # Ok::<(), labor_cost_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineFile>(&path.join("engine.yaml"))?;
        engine.calculation.validate()?;

        let sectors_file = Self::load_yaml::<SectorsFile>(&path.join("sectors.yaml"))?;
        let sectors = SectorRateTable::new(sectors_file.default_sector, sectors_file.sectors)?;

        info!(
            path = %path.display(),
            name = %engine.metadata.name,
            version = %engine.metadata.version,
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(engine.metadata, engine.calculation, sectors),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the default calculation parameters.
    pub fn defaults(&self) -> &CalculationConfig {
        self.config.defaults()
    }

    /// Returns the sector rate table.
    pub fn sectors(&self) -> &SectorRateTable {
        self.config.sectors()
    }
}
