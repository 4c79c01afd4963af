//! Government types and the bonuses they grant planets

use serde::{Deserialize, Serialize};

use crate::content::{CategoryBonuses, ProductionCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Government {
    pub name: String,
    /// Happiness every planet starts from
    pub base_happiness: i32,
    /// Extra happiness while the realm is at war
    pub war_happiness: i32,
    /// Extra happiness on planets with a governor
    pub governor_happiness: i32,
    /// Production bonuses, only on planets with enough population
    pub bonuses: CategoryBonuses,
    /// Happiness is always 0 and never rolls effects
    pub immune_to_happiness: bool,
    pub credit_rush: bool,
    pub population_rush: bool,
}

impl Government {
    pub fn democracy() -> Self {
        Self {
            name: "Democracy".into(),
            base_happiness: 1,
            war_happiness: -1,
            governor_happiness: 0,
            bonuses: CategoryBonuses::new().with(ProductionCategory::Credits, 1),
            immune_to_happiness: false,
            credit_rush: true,
            population_rush: false,
        }
    }

    pub fn empire() -> Self {
        Self {
            name: "Empire".into(),
            base_happiness: 0,
            war_happiness: 1,
            governor_happiness: 1,
            bonuses: CategoryBonuses::new().with(ProductionCategory::Production, 1),
            immune_to_happiness: false,
            credit_rush: true,
            population_rush: true,
        }
    }

    pub fn hive_mind() -> Self {
        Self {
            name: "Hive mind".into(),
            base_happiness: 0,
            war_happiness: 0,
            governor_happiness: 0,
            bonuses: CategoryBonuses::new().with(ProductionCategory::Food, 1),
            immune_to_happiness: true,
            credit_rush: false,
            population_rush: true,
        }
    }

    pub fn technocracy() -> Self {
        Self {
            name: "Technocracy".into(),
            base_happiness: 0,
            war_happiness: 0,
            governor_happiness: 1,
            bonuses: CategoryBonuses::new().with(ProductionCategory::Research, 1),
            immune_to_happiness: false,
            credit_rush: true,
            population_rush: false,
        }
    }

    pub fn bonus(&self, category: ProductionCategory) -> i32 {
        self.bonuses.get(category)
    }
}
