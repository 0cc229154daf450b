//! Configuration loading and management for the Labor Cost Engine.
//!
//! This module provides the calculation parameters that drive every
//! computation and functionality to load them, together with the sector rate
//! table, from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use labor_cost_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/reference").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculationConfig, ChargeRates, DayCountBasis, EngineConfig, EngineFile, EngineMetadata,
    MAX_ROUNDING_DECIMALS, RoundingConfig, RoundingMode, SectorsFile, VacationMethod,
};
