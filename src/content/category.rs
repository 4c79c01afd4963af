//! Production categories and per-category bonus tables

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::ContentLoadError;

/// The six stockpiled outputs of a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductionCategory {
    Food,
    Metal,
    Production,
    Research,
    Culture,
    Credits,
}

impl ProductionCategory {
    pub const ALL: [ProductionCategory; 6] = [
        ProductionCategory::Food,
        ProductionCategory::Metal,
        ProductionCategory::Production,
        ProductionCategory::Research,
        ProductionCategory::Culture,
        ProductionCategory::Credits,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProductionCategory::Food => "food",
            ProductionCategory::Metal => "metal",
            ProductionCategory::Production => "production",
            ProductionCategory::Research => "research",
            ProductionCategory::Culture => "culture",
            ProductionCategory::Credits => "credits",
        }
    }

    /// Categories that can never go below zero after all modifiers
    pub fn is_floored(&self) -> bool {
        matches!(
            self,
            ProductionCategory::Food
                | ProductionCategory::Metal
                | ProductionCategory::Production
                | ProductionCategory::Research
        )
    }
}

impl fmt::Display for ProductionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProductionCategory {
    type Err = ContentLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(ProductionCategory::Food),
            "metal" => Ok(ProductionCategory::Metal),
            "production" => Ok(ProductionCategory::Production),
            "research" => Ok(ProductionCategory::Research),
            "culture" => Ok(ProductionCategory::Culture),
            "credit" | "credits" => Ok(ProductionCategory::Credits),
            _ => Err(ContentLoadError::InvalidCategory(s.to_string())),
        }
    }
}

/// Signed bonus per production category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBonuses {
    pub food: i32,
    pub metal: i32,
    pub production: i32,
    pub research: i32,
    pub culture: i32,
    pub credits: i32,
}

impl CategoryBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ProductionCategory) -> i32 {
        match category {
            ProductionCategory::Food => self.food,
            ProductionCategory::Metal => self.metal,
            ProductionCategory::Production => self.production,
            ProductionCategory::Research => self.research,
            ProductionCategory::Culture => self.culture,
            ProductionCategory::Credits => self.credits,
        }
    }

    pub fn set(&mut self, category: ProductionCategory, value: i32) {
        match category {
            ProductionCategory::Food => self.food = value,
            ProductionCategory::Metal => self.metal = value,
            ProductionCategory::Production => self.production = value,
            ProductionCategory::Research => self.research = value,
            ProductionCategory::Culture => self.culture = value,
            ProductionCategory::Credits => self.credits = value,
        }
    }

    /// Builder-style setter
    pub fn with(mut self, category: ProductionCategory, value: i32) -> Self {
        self.set(category, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        ProductionCategory::ALL.iter().all(|c| self.get(*c) == 0)
    }
}
