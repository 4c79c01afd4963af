//! Race traits consumed by the economy

use serde::{Deserialize, Serialize};

use crate::content::ProductionCategory;
use crate::core::config::EconomyConfig;
use crate::core::types::RaceId;
use crate::planet::environment::{Environment, Gravity, Temperature, WaterLevel};

/// Racial trait flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceTrait {
    /// Eats metal instead of food
    Lithovorian,
    /// Feeds on radiation; food baseline and farming scale with it
    EnergyPowered,
    /// Grows by one step whenever fed, regardless of surplus
    FixedGrowth,
    /// Positive growth halved
    LimitedGrowth,
    /// +1 credit per credit building
    Mercantile,
}

/// A playable race, as seen by the planetary economy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    /// Food eaten per worker, percent
    pub food_requirement: u32,
    /// Growth speed, percent; 0 means the race never grows naturally
    pub growth_speed: u32,
    pub farming_speed: u32,
    pub mining_speed: u32,
    pub production_speed: u32,
    pub research_speed: u32,
    pub culture_speed: u32,
    /// Highest radiation level tolerated without penalty
    pub max_radiation: u8,
    /// Added to every planet's population limit
    pub extra_population: i32,
    /// Ground combat strength per worker
    pub troop_power: u32,
    pub preferred_gravity: Gravity,
    pub preferred_temperature: Temperature,
    pub traits: Vec<RaceTrait>,
}

impl Race {
    /// Baseline race: every speed at 100%
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id: RaceId(id),
            name: name.to_string(),
            food_requirement: 100,
            growth_speed: 100,
            farming_speed: 100,
            mining_speed: 100,
            production_speed: 100,
            research_speed: 100,
            culture_speed: 100,
            max_radiation: 1,
            extra_population: 0,
            troop_power: 10,
            preferred_gravity: Gravity::Normal,
            preferred_temperature: Temperature::Temperate,
            traits: Vec::new(),
        }
    }

    /// Metal-eating miners
    pub fn lithoid() -> Self {
        let mut race = Self::new(2, "Lithoid");
        race.mining_speed = 150;
        race.farming_speed = 50;
        race.growth_speed = 50;
        race.max_radiation = 3;
        race.preferred_gravity = Gravity::High;
        race.traits.push(RaceTrait::Lithovorian);
        race
    }

    /// Self-replicating machines: no food, no natural growth
    pub fn synthetic() -> Self {
        let mut race = Self::new(3, "Synthetic");
        race.food_requirement = 0;
        race.growth_speed = 0;
        race.production_speed = 150;
        race.culture_speed = 50;
        race.max_radiation = 5;
        race.troop_power = 12;
        race
    }

    /// Radiation feeders
    pub fn photovore() -> Self {
        let mut race = Self::new(4, "Photovore");
        race.research_speed = 150;
        race.max_radiation = 4;
        race.preferred_temperature = Temperature::Hot;
        race.traits.push(RaceTrait::EnergyPowered);
        race
    }

    pub fn has_trait(&self, race_trait: RaceTrait) -> bool {
        self.traits.contains(&race_trait)
    }

    pub fn is_lithovorian(&self) -> bool {
        self.has_trait(RaceTrait::Lithovorian)
    }

    pub fn is_energy_powered(&self) -> bool {
        self.has_trait(RaceTrait::EnergyPowered)
    }

    /// Needs no food and never grows on its own
    pub fn is_self_replicating(&self) -> bool {
        self.food_requirement == 0 && self.growth_speed == 0
    }

    /// Worker output speed for a category on a given planet, percent
    pub fn speed(&self, category: ProductionCategory, env: &Environment, config: &EconomyConfig) -> u32 {
        match category {
            ProductionCategory::Food => {
                if self.is_energy_powered() {
                    let step = config.energy_radiation_speed_step * u32::from(env.radiation);
                    self.farming_speed * (100 + step) / 100
                } else {
                    self.farming_speed
                }
            }
            ProductionCategory::Metal => self.mining_speed,
            ProductionCategory::Production => self.production_speed,
            ProductionCategory::Research => self.research_speed,
            ProductionCategory::Culture => self.culture_speed,
            ProductionCategory::Credits => 0,
        }
    }

    /// How well the race fits a planet, percent (0..=100)
    pub fn suitability(&self, env: &Environment) -> u32 {
        if env.gas_giant {
            return 0;
        }

        let mut score: i32 = 100;

        let gravity_diff = (env.gravity as i32 - self.preferred_gravity as i32).abs();
        score -= gravity_diff * 25;

        let temperature_diff =
            (env.temperature as i32 - self.preferred_temperature as i32).abs();
        score -= temperature_diff * 20;

        if !self.is_energy_powered() {
            score -= match env.water {
                WaterLevel::Barren => 30,
                WaterLevel::Arid => 10,
                WaterLevel::Humid => 0,
                WaterLevel::Ocean => 10,
            };
        }

        if env.radiation > self.max_radiation {
            score -= i32::from(env.radiation - self.max_radiation) * 25;
        }

        score.clamp(0, 100) as u32
    }
}
