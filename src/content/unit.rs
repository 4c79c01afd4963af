//! Mobile unit definitions

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::category::{CategoryBonuses, ProductionCategory};
use crate::content::ContentLoadError;
use crate::core::types::UnitId;

/// Hull class, deciding where a completed unit goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hull {
    /// Stays in the planet's orbit and replaces any existing orbital
    Orbital,
    /// Joins a fleet
    Ship,
}

impl FromStr for Hull {
    type Err = ContentLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "orbital" => Ok(Hull::Orbital),
            "ship" => Ok(Hull::Ship),
            _ => Err(ContentLoadError::InvalidHull(s.to_string())),
        }
    }
}

/// What a unit is for; matched against standing missions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitRole {
    Colony,
    Freighter,
    Warship,
    Trooper,
    Scout,
    Station,
}

impl FromStr for UnitRole {
    type Err = ContentLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "colony" => Ok(UnitRole::Colony),
            "freighter" => Ok(UnitRole::Freighter),
            "warship" => Ok(UnitRole::Warship),
            "trooper" => Ok(UnitRole::Trooper),
            "scout" => Ok(UnitRole::Scout),
            "station" => Ok(UnitRole::Station),
            _ => Err(ContentLoadError::InvalidRole(s.to_string())),
        }
    }
}

/// Immutable definition of a unit blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    pub id: UnitId,
    pub name: String,
    pub hull: Hull,
    pub role: UnitRole,
    pub metal_cost: u32,
    pub production_cost: u32,
    /// Output bonus while serving as the planet's orbital
    pub bonuses: CategoryBonuses,
}

impl UnitDef {
    pub fn new(
        id: &str,
        name: &str,
        hull: Hull,
        role: UnitRole,
        metal_cost: u32,
        production_cost: u32,
    ) -> Self {
        Self {
            id: UnitId::new(id),
            name: name.to_string(),
            hull,
            role,
            metal_cost,
            production_cost,
            bonuses: CategoryBonuses::default(),
        }
    }

    pub fn with_bonus(mut self, category: ProductionCategory, value: i32) -> Self {
        self.bonuses.set(category, value);
        self
    }

    pub fn is_orbital(&self) -> bool {
        self.hull == Hull::Orbital
    }

    /// Combined cost, used to rank orbital upgrades against downgrades
    pub fn total_cost(&self) -> u32 {
        self.metal_cost + self.production_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbital_unit() {
        let station = UnitDef::new("space_station", "Space station", Hull::Orbital, UnitRole::Station, 40, 60)
            .with_bonus(ProductionCategory::Research, 1);
        assert!(station.is_orbital());
        assert_eq!(station.total_cost(), 100);
        assert_eq!(station.bonuses.get(ProductionCategory::Research), 1);
    }

    #[test]
    fn test_hull_and_role_parse() {
        assert_eq!("Orbital".parse::<Hull>().unwrap(), Hull::Orbital);
        assert_eq!("colony".parse::<UnitRole>().unwrap(), UnitRole::Colony);
        assert!(matches!("saucer".parse::<Hull>(), Err(ContentLoadError::InvalidHull(_))));
        assert!(matches!("pirate".parse::<UnitRole>(), Err(ContentLoadError::InvalidRole(_))));
    }
}
