//! Production ledger - the six outputs of a planet and their contributions
//!
//! Every total is the sum of attributable contributions, in this order:
//! 1. Fixed baseline (metal/production +1, food by water level)
//! 2. Workers: `count * racial_speed / 100`, truncating
//! 3. Buildings (plus mercantile credit per credit building)
//! 4. Applied statuses
//! 5. Orbital
//! 6. Government, once the population is large enough
//! 7. Governor perks
//! 8. Last turn's happiness effect
//! 9. Tax (production only, capped at the pre-tax total; credited to credits)
//! 10. Home world culture
//! 11. Floor at 0 for food/metal/production/research
//! 12. Metal capped at the metal left in the ground
//!
//! Explanations are recomputed on demand from a `ProductionBreakdown`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::{ContentRegistry, ProductionCategory};
use crate::core::config::EconomyConfig;
use crate::core::error::Result;
use crate::planet::{Planet, WorkerRole};
use crate::realm::{RaceTrait, Realm};

/// Where a contribution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContributionSource {
    Baseline,
    Workers,
    Buildings,
    Mercantile,
    Statuses,
    Orbital,
    Government,
    Governor,
    Happiness,
    Tax,
    HomeWorld,
    Floor,
    GroundLimit,
}

impl ContributionSource {
    pub fn label(&self) -> &'static str {
        match self {
            ContributionSource::Baseline => "baseline",
            ContributionSource::Workers => "workers",
            ContributionSource::Buildings => "buildings",
            ContributionSource::Mercantile => "mercantile race",
            ContributionSource::Statuses => "statuses",
            ContributionSource::Orbital => "orbital",
            ContributionSource::Government => "government",
            ContributionSource::Governor => "governor",
            ContributionSource::Happiness => "happiness",
            ContributionSource::Tax => "tax",
            ContributionSource::HomeWorld => "home world",
            ContributionSource::Floor => "floor",
            ContributionSource::GroundLimit => "metal left in ground",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub source: ContributionSource,
    pub amount: i32,
}

/// Itemized total of one production category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionBreakdown {
    pub category: ProductionCategory,
    pub contributions: Vec<Contribution>,
}

impl ProductionBreakdown {
    pub fn new(category: ProductionCategory) -> Self {
        Self {
            category,
            contributions: Vec::new(),
        }
    }

    /// Record a contribution; zero amounts are skipped
    pub fn add(&mut self, source: ContributionSource, amount: i32) {
        if amount != 0 {
            self.contributions.push(Contribution { source, amount });
        }
    }

    pub fn total(&self) -> i32 {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    pub fn amount_from(&self, source: ContributionSource) -> i32 {
        self.contributions
            .iter()
            .filter(|c| c.source == source)
            .map(|c| c.amount)
            .sum()
    }
}

impl fmt::Display for ProductionBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.category, self.total())?;
        for c in &self.contributions {
            writeln!(f, "  {:+} {}", c.amount, c.source.label())?;
        }
        Ok(())
    }
}

/// All outputs of one turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yields {
    pub food: i32,
    pub metal: i32,
    pub production: i32,
    pub research: i32,
    pub culture: i32,
    pub credits: i32,
    pub population_delta: i32,
    pub artifact_research: i32,
}

impl Yields {
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
}

/// Contributions 1 through 8, shared by every category
fn base_breakdown(
    planet: &Planet,
    realm: &Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
    category: ProductionCategory,
) -> Result<ProductionBreakdown> {
    let mut breakdown = ProductionBreakdown::new(category);
    let race = &realm.race;
    let env = &planet.environment;

    let baseline = match category {
        ProductionCategory::Metal | ProductionCategory::Production => 1,
        ProductionCategory::Food if race.is_energy_powered() => i32::from(env.radiation),
        ProductionCategory::Food => env.water.food_baseline(),
        _ => 0,
    };
    breakdown.add(ContributionSource::Baseline, baseline);

    if let Some(role) = WorkerRole::for_category(category) {
        let count = planet.workforce().get(role);
        let speed = race.speed(category, env, config);
        breakdown.add(ContributionSource::Workers, (count * speed / 100) as i32);
    }

    let mut from_buildings = 0;
    let mut credit_buildings = 0;
    for id in planet.buildings() {
        let building = content.building(id)?;
        from_buildings += building.bonus(category);
        if building.is_credit_building() {
            credit_buildings += 1;
        }
    }
    breakdown.add(ContributionSource::Buildings, from_buildings);
    if category == ProductionCategory::Credits && race.has_trait(RaceTrait::Mercantile) {
        breakdown.add(ContributionSource::Mercantile, credit_buildings);
    }

    let from_statuses = planet.statuses.iter().map(|s| s.bonuses.get(category)).sum();
    breakdown.add(ContributionSource::Statuses, from_statuses);

    if let Some(orbital) = &planet.orbital {
        breakdown.add(ContributionSource::Orbital, content.unit(orbital)?.bonuses.get(category));
    }

    if planet.population() >= config.government_bonus_min_population {
        breakdown.add(ContributionSource::Government, realm.government.bonus(category));
    }

    if let Some(leader) = planet.governor().and_then(|id| realm.leader(id)) {
        breakdown.add(ContributionSource::Governor, leader.production_bonus(category));
    }

    if planet.happiness_effect.category() == Some(category) {
        breakdown.add(ContributionSource::Happiness, planet.happiness_effect.magnitude);
    }

    Ok(breakdown)
}

/// Production actually diverted by the tax rate this turn
fn taxed_production(
    planet: &Planet,
    realm: &Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
) -> Result<i32> {
    let pre_tax = base_breakdown(planet, realm, content, config, ProductionCategory::Production)?.total();
    Ok(i32::try_from(planet.tax).unwrap_or(i32::MAX).min(pre_tax.max(0)))
}

/// Itemized total for one category
///
/// An unowned planet produces nothing.
pub fn production_breakdown(
    planet: &Planet,
    realm: &Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
    category: ProductionCategory,
) -> Result<ProductionBreakdown> {
    if !planet.is_colonized() {
        return Ok(ProductionBreakdown::new(category));
    }

    let mut breakdown = base_breakdown(planet, realm, content, config, category)?;

    match category {
        ProductionCategory::Production => {
            let taxed = taxed_production(planet, realm, content, config)?;
            breakdown.add(ContributionSource::Tax, -taxed);
        }
        ProductionCategory::Credits => {
            let taxed = taxed_production(planet, realm, content, config)?;
            breakdown.add(ContributionSource::Tax, taxed);
        }
        ProductionCategory::Culture => {
            if planet.home_world.is_some() {
                breakdown.add(ContributionSource::HomeWorld, 1);
            }
        }
        _ => {}
    }

    if category.is_floored() {
        let total = breakdown.total();
        if total < 0 {
            breakdown.add(ContributionSource::Floor, -total);
        }
    }

    if category == ProductionCategory::Metal {
        let total = breakdown.total();
        let in_ground = planet.metal_in_ground().min(i32::MAX as u32) as i32;
        if total > in_ground {
            breakdown.add(ContributionSource::GroundLimit, in_ground - total);
        }
    }

    Ok(breakdown)
}

pub fn total_production(
    planet: &Planet,
    realm: &Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
    category: ProductionCategory,
) -> Result<i32> {
    Ok(production_breakdown(planet, realm, content, config, category)?.total())
}

/// Signed surplus feeding the population accumulator
///
/// Lithovorian races eat metal instead of food. Races that neither eat nor
/// grow always report 0.
pub fn population_delta(
    planet: &Planet,
    realm: &Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
) -> Result<i32> {
    let race = &realm.race;
    if !planet.is_colonized() || race.is_self_replicating() {
        return Ok(0);
    }

    let supply_category = if race.is_lithovorian() {
        ProductionCategory::Metal
    } else {
        ProductionCategory::Food
    };
    let supply = total_production(planet, realm, content, config, supply_category)?;
    let requirement = (planet.population() * race.food_requirement / 100) as i32;
    let delta = supply - requirement;

    let delta = if race.has_trait(RaceTrait::FixedGrowth) && delta >= 0 {
        1
    } else if race.has_trait(RaceTrait::LimitedGrowth) && delta > 0 {
        delta / 2
    } else {
        delta
    };
    Ok(delta)
}

/// Research toward deciphering artifacts; 0 without an undeciphered artifact
pub fn artifact_research(planet: &Planet, realm: &Realm, content: &ContentRegistry) -> Result<i32> {
    if !planet.is_colonized() || realm.undeciphered_artifacts == 0 {
        return Ok(0);
    }
    let mut total = 0;
    for id in planet.buildings() {
        total += content.building(id)?.artifact_research;
    }
    if let Some(leader) = planet.governor().and_then(|id| realm.leader(id)) {
        total += leader.artifact_bonus();
    }
    Ok(total.max(0))
}

/// Credit upkeep of every installed building
pub fn building_upkeep(planet: &Planet, content: &ContentRegistry) -> Result<u32> {
    let mut upkeep = 0u32;
    for id in planet.buildings() {
        upkeep = upkeep.saturating_add(content.building(id)?.upkeep);
    }
    Ok(upkeep)
}

/// Every output of the planet for this turn
pub fn yields(
    planet: &Planet,
    realm: &Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
) -> Result<Yields> {
    let total = |category| total_production(planet, realm, content, config, category);
    let yields = Yields {
        food: total(ProductionCategory::Food)?,
        metal: total(ProductionCategory::Metal)?,
        production: total(ProductionCategory::Production)?,
        research: total(ProductionCategory::Research)?,
        culture: total(ProductionCategory::Culture)?,
        credits: total(ProductionCategory::Credits)?,
        population_delta: population_delta(planet, realm, content, config)?,
        artifact_research: artifact_research(planet, realm, content)?,
    };
    tracing::debug!("{} yields {:?}", planet.name, yields);
    Ok(yields)
}
