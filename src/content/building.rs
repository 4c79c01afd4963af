//! Building definitions

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::category::{CategoryBonuses, ProductionCategory};
use crate::content::ContentLoadError;
use crate::core::types::BuildingId;

/// Category tag of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingCategory {
    Farm,
    Mine,
    Factory,
    Research,
    Culture,
    Credit,
    Military,
    Recycle,
    Wildlife,
}

impl FromStr for BuildingCategory {
    type Err = ContentLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "farm" => Ok(BuildingCategory::Farm),
            "mine" => Ok(BuildingCategory::Mine),
            "factory" => Ok(BuildingCategory::Factory),
            "research" => Ok(BuildingCategory::Research),
            "culture" => Ok(BuildingCategory::Culture),
            "credit" => Ok(BuildingCategory::Credit),
            "military" => Ok(BuildingCategory::Military),
            "recycle" => Ok(BuildingCategory::Recycle),
            "wildlife" => Ok(BuildingCategory::Wildlife),
            _ => Err(ContentLoadError::InvalidBuildingCategory(s.to_string())),
        }
    }
}

/// Immutable definition of a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDef {
    /// Stable registry key
    pub id: BuildingId,
    /// Display name
    pub name: String,
    pub category: BuildingCategory,
    /// Per-category output bonus
    pub bonuses: CategoryBonuses,
    /// Percentage of a lost building's metal cost recovered on this planet
    pub material: u32,
    /// Research points applied to undeciphered artifacts
    pub artifact_research: i32,
    pub metal_cost: u32,
    pub production_cost: u32,
    /// Credits per turn
    pub upkeep: u32,
    pub happiness: i32,
    /// At most one copy per planet
    pub single_instance: bool,
    /// Defensive strength lent to ground defenders
    pub wildlife_power: u32,
    /// Building swapped out in place when this one completes
    pub replaces: Option<BuildingId>,
}

impl BuildingDef {
    /// Minimal definition with the given costs; remaining fields default to zero
    pub fn new(
        id: &str,
        name: &str,
        category: BuildingCategory,
        metal_cost: u32,
        production_cost: u32,
    ) -> Self {
        Self {
            id: BuildingId::new(id),
            name: name.to_string(),
            category,
            bonuses: CategoryBonuses::default(),
            material: 0,
            artifact_research: 0,
            metal_cost,
            production_cost,
            upkeep: 0,
            happiness: 0,
            single_instance: false,
            wildlife_power: 0,
            replaces: None,
        }
    }

    pub fn with_bonus(mut self, category: ProductionCategory, value: i32) -> Self {
        self.bonuses.set(category, value);
        self
    }

    pub fn with_upkeep(mut self, upkeep: u32) -> Self {
        self.upkeep = upkeep;
        self
    }

    pub fn with_happiness(mut self, happiness: i32) -> Self {
        self.happiness = happiness;
        self
    }

    pub fn with_material(mut self, material: u32) -> Self {
        self.material = material;
        self
    }

    pub fn with_artifact_research(mut self, value: i32) -> Self {
        self.artifact_research = value;
        self
    }

    pub fn with_wildlife_power(mut self, power: u32) -> Self {
        self.wildlife_power = power;
        self
    }

    pub fn single_instance(mut self) -> Self {
        self.single_instance = true;
        self
    }

    pub fn replacing(mut self, id: &str) -> Self {
        self.replaces = Some(BuildingId::new(id));
        self
    }

    pub fn bonus(&self, category: ProductionCategory) -> i32 {
        self.bonuses.get(category)
    }

    /// Credit buildings earn mercantile races an extra credit each
    pub fn is_credit_building(&self) -> bool {
        self.bonuses.credits > 0
    }
}
