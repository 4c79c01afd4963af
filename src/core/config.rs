//! Economy configuration with documented balance constants
//!
//! All magic numbers of the turn economy are collected here with explanations
//! of their purpose and how they interact with each other.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EconomyError, Result};

/// Balance constants for the planetary economy
///
/// The defaults are the shipped balance. Loading a TOML file only overrides
/// the keys present in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    // === POPULATION ===
    /// Numerator of the growth threshold: `require = growth_base / growth_speed%`
    ///
    /// With the default of 1000 a race at 100% growth speed needs an extra
    /// food accumulator of 10 to gain a worker, and starves at -10.
    pub growth_base: i32,

    /// Minimum population before government production bonuses apply
    pub government_bonus_min_population: u32,

    // === RUSHING ===
    /// Credit price of one missing production point when rushing
    ///
    /// Metal is priced 1:1, production at this multiple:
    /// `rush_cost = metal_gap + multiplier * production_gap`
    pub rush_production_multiplier: u32,

    /// Rush cost covered by a single sacrificed worker when rushing with population
    ///
    /// `sacrifice = rush_cost / divisor + 1`
    pub population_rush_divisor: u32,

    // === ORBITALS ===
    /// Share of the current orbital's cost credited when building a replacement
    pub orbital_discount_percent: u32,

    // === ENVIRONMENT ===
    /// Highest radiation category a planet can reach
    pub max_radiation_level: u8,

    /// Farming speed gained per radiation level by energy-powered races (percent)
    pub energy_radiation_speed_step: u32,

    // === BOMBARDMENT ===
    /// Minimum number of hits a strike lands regardless of ground size
    pub strike_min_hits: u32,

    /// Culture lost per hit by a conventional bombardment
    pub conventional_culture_loss_per_hit: u32,

    /// Percentage of accumulated culture lost to a neutron strike
    pub neutron_culture_loss_percent: u32,

    // === VIRTUAL PROJECTS ===
    /// Metal cost of a self-replicating citizen
    ///
    /// Half of this is recovered when such a citizen dies of overpopulation.
    pub citizen_metal_cost: u32,
    /// Production cost of a self-replicating citizen
    pub citizen_production_cost: u32,
    /// Production cost of one extra-culture batch
    pub extra_culture_production_cost: u32,
    /// Culture gained from one extra-culture batch
    pub extra_culture_yield: u32,
    /// Production cost of one extra-credit batch
    pub extra_credit_production_cost: u32,
    /// Credits gained from one extra-credit batch
    pub extra_credit_yield: i32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            growth_base: 1000,
            government_bonus_min_population: 4,

            rush_production_multiplier: 2,
            population_rush_divisor: 80,

            orbital_discount_percent: 50,

            max_radiation_level: 5,
            energy_radiation_speed_step: 25,

            strike_min_hits: 2,
            conventional_culture_loss_per_hit: 2,
            neutron_culture_loss_percent: 10,

            citizen_metal_cost: 20,
            citizen_production_cost: 10,
            extra_culture_production_cost: 10,
            extra_culture_yield: 3,
            extra_credit_production_cost: 10,
            extra_credit_yield: 3,
        }
    }
}

impl EconomyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a TOML string, keeping defaults for missing keys
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EconomyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.growth_base <= 0 {
            return Err(EconomyError::InvalidConfig(format!(
                "growth_base ({}) must be positive",
                self.growth_base
            )));
        }

        if self.rush_production_multiplier == 0 || self.population_rush_divisor == 0 {
            return Err(EconomyError::InvalidConfig(
                "rush multiplier and population rush divisor must be positive".into(),
            ));
        }

        if self.orbital_discount_percent > 100 || self.neutron_culture_loss_percent > 100 {
            return Err(EconomyError::InvalidConfig(
                "percentages must not exceed 100".into(),
            ));
        }

        if self.strike_min_hits == 0 {
            return Err(EconomyError::InvalidConfig(
                "strike_min_hits must be at least 1".into(),
            ));
        }

        if self.max_radiation_level == 0 {
            return Err(EconomyError::InvalidConfig(
                "max_radiation_level must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EconomyConfig> = OnceLock::new();

/// Get the global economy config (initializes with defaults if not set)
pub fn config() -> &'static EconomyConfig {
    CONFIG.get_or_init(EconomyConfig::default)
}

/// Set the global economy config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EconomyConfig) -> std::result::Result<(), EconomyConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EconomyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_growth_threshold_default() {
        let config = EconomyConfig::default();
        // 100% growth speed => threshold 10
        assert_eq!(config.growth_base / 100, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EconomyConfig::from_toml_str("rush_production_multiplier = 3\n")
            .expect("partial config should parse");
        assert_eq!(config.rush_production_multiplier, 3);
        assert_eq!(config.growth_base, 1000);
        assert_eq!(config.population_rush_divisor, 80);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = EconomyConfig::from_toml_str("growth_base = 0\n");
        assert!(matches!(result, Err(EconomyError::InvalidConfig(_))));

        let result = EconomyConfig::from_toml_str("orbital_discount_percent = 150\n");
        assert!(matches!(result, Err(EconomyError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_shipped_economy_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/economy.toml");
        let config = EconomyConfig::load_from_toml(&path).expect("Should load data/economy.toml");
        assert_eq!(config, EconomyConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = EconomyConfig::from_toml_str("growth_base = \"lots\"\n");
        assert!(matches!(result, Err(EconomyError::TomlError(_))));
    }
}
