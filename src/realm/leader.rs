//! Leaders - governors and rulers exposing perks
//!
//! Leader lifecycle lives elsewhere. The economy only reads perks and bumps
//! experience and the three construction/growth counters.

use serde::{Deserialize, Serialize};

use crate::content::ProductionCategory;
use crate::core::types::LeaderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perk {
    Agricultural,
    Miner,
    Industrious,
    Academic,
    Scientist,
    Stupid,
    Explorer,
    Archaeologist,
    Artistic,
    Merchant,
    Corrupted,
    GoodLeader,
    Cruel,
}

impl Perk {
    /// Output delta this perk gives the governed planet
    pub fn production_delta(self, category: ProductionCategory) -> i32 {
        match (self, category) {
            (Perk::Agricultural, ProductionCategory::Food) => 1,
            (Perk::Miner, ProductionCategory::Metal) => 1,
            (Perk::Industrious, ProductionCategory::Production) => 1,
            (Perk::Academic, ProductionCategory::Research) => 1,
            (Perk::Scientist, ProductionCategory::Research) => 1,
            (Perk::Stupid, ProductionCategory::Research) => -1,
            (Perk::Artistic, ProductionCategory::Culture) => 1,
            (Perk::Merchant, ProductionCategory::Credits) => 1,
            (Perk::Corrupted, ProductionCategory::Credits) => -1,
            _ => 0,
        }
    }

    pub fn artifact_delta(self) -> i32 {
        match self {
            Perk::Academic | Perk::Scientist | Perk::Explorer => 1,
            Perk::Archaeologist => 2,
            Perk::Stupid => -1,
            _ => 0,
        }
    }

    pub fn happiness_delta(self) -> i32 {
        match self {
            Perk::GoodLeader => 1,
            Perk::Cruel => -1,
            _ => 0,
        }
    }
}

/// Counters the economy increments as side effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderStats {
    pub buildings_built: u32,
    pub ships_built: u32,
    pub population_growth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub id: LeaderId,
    pub name: String,
    pub perks: Vec<Perk>,
    pub experience: u32,
    pub stats: LeaderStats,
}

impl Leader {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id: LeaderId(id),
            name: name.to_string(),
            perks: Vec::new(),
            experience: 0,
            stats: LeaderStats::default(),
        }
    }

    pub fn with_perk(mut self, perk: Perk) -> Self {
        self.perks.push(perk);
        self
    }

    pub fn has_perk(&self, perk: Perk) -> bool {
        self.perks.contains(&perk)
    }

    pub fn stats(&self) -> &LeaderStats {
        &self.stats
    }

    pub fn production_bonus(&self, category: ProductionCategory) -> i32 {
        self.perks.iter().map(|p| p.production_delta(category)).sum()
    }

    pub fn artifact_bonus(&self) -> i32 {
        self.perks.iter().map(|p| p.artifact_delta()).sum()
    }

    pub fn happiness_bonus(&self) -> i32 {
        self.perks.iter().map(|p| p.happiness_delta()).sum()
    }
}
