//! Rushing - paying credits or colonists to fill the active project's gap
//!
//! Formula: `rush_cost = metal_gap + multiplier * production_gap`
//! - Metal for the gap is dug from the ground, so a gap larger than the
//!   metal left in the ground cannot be rushed
//! - Population rushing sacrifices `rush_cost / divisor + 1` workers and must
//!   leave at least one behind
//!
//! Rushing fills the stockpiles; the project still completes on the next
//! construction check.

use serde::{Deserialize, Serialize};

use crate::content::ContentRegistry;
use crate::core::config::EconomyConfig;
use crate::core::error::Result;
use crate::economy::construction::project_cost;
use crate::planet::Planet;
use crate::realm::{Notice, NoticeKind, Realm};

/// Price of finishing the active project now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RushQuote {
    pub metal_gap: u32,
    pub production_gap: u32,
    pub cost: u32,
    /// Metal gap fits in what is left in the ground
    pub feasible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RushRejection {
    NotOwner,
    NoProject,
    NothingToRush,
    NotEnoughMetalInGround,
    NotPermitted,
    InsufficientCredits { cost: u32, treasury: i32 },
    InsufficientPopulation { sacrifice: u32, population: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RushOutcome {
    PaidCredits { cost: u32 },
    SacrificedWorkers { workers: u32 },
    Rejected(RushRejection),
}

/// Quote the active project; None when nothing is under construction
pub fn rush_quote(
    planet: &Planet,
    content: &ContentRegistry,
    config: &EconomyConfig,
) -> Result<Option<RushQuote>> {
    let Some(project) = planet.construction() else {
        return Ok(None);
    };
    let cost = project_cost(planet, project, content, config)?;
    let metal_gap = cost.metal.saturating_sub(planet.metal());
    let production_gap = cost.production.saturating_sub(planet.production());
    Ok(Some(RushQuote {
        metal_gap,
        production_gap,
        cost: metal_gap.saturating_add(config.rush_production_multiplier.saturating_mul(production_gap)),
        feasible: metal_gap <= planet.metal_in_ground(),
    }))
}

/// Workers sacrificed to cover a rush cost
pub fn population_sacrifice(cost: u32, config: &EconomyConfig) -> u32 {
    cost / config.population_rush_divisor + 1
}

fn checked_quote(
    planet: &Planet,
    realm: &Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
) -> Result<std::result::Result<RushQuote, RushRejection>> {
    if !planet.is_owned_by(realm.id) {
        return Ok(Err(RushRejection::NotOwner));
    }
    let Some(quote) = rush_quote(planet, content, config)? else {
        return Ok(Err(RushRejection::NoProject));
    };
    if quote.cost == 0 {
        return Ok(Err(RushRejection::NothingToRush));
    }
    if !quote.feasible {
        return Ok(Err(RushRejection::NotEnoughMetalInGround));
    }
    Ok(Ok(quote))
}

fn fill_gap(planet: &mut Planet, quote: &RushQuote) {
    let mined = planet.mine_metal(quote.metal_gap);
    planet.add_metal(mined);
    planet.add_production(quote.production_gap);
}

/// Pay the rush cost from the treasury
pub fn rush_with_credits(
    planet: &mut Planet,
    realm: &mut Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
    events: &mut Vec<Notice>,
) -> Result<RushOutcome> {
    let quote = match checked_quote(planet, realm, content, config)? {
        Ok(quote) => quote,
        Err(rejection) => return Ok(RushOutcome::Rejected(rejection)),
    };
    if !realm.government.credit_rush {
        return Ok(RushOutcome::Rejected(RushRejection::NotPermitted));
    }
    if !realm.spend_credits(quote.cost) {
        return Ok(RushOutcome::Rejected(RushRejection::InsufficientCredits {
            cost: quote.cost,
            treasury: realm.treasury,
        }));
    }

    fill_gap(planet, &quote);
    tracing::info!("{} rushed for {} credits", planet.name, quote.cost);
    events.push(Notice::new(
        NoticeKind::Rushed,
        &planet.name,
        format!("Construction rushed for {} credits", quote.cost),
    ));
    Ok(RushOutcome::PaidCredits { cost: quote.cost })
}

/// Pay the rush cost with colonists, lost in starvation order
pub fn rush_with_population(
    planet: &mut Planet,
    realm: &mut Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
    events: &mut Vec<Notice>,
) -> Result<RushOutcome> {
    let quote = match checked_quote(planet, realm, content, config)? {
        Ok(quote) => quote,
        Err(rejection) => return Ok(RushOutcome::Rejected(rejection)),
    };
    if !realm.government.population_rush {
        return Ok(RushOutcome::Rejected(RushRejection::NotPermitted));
    }
    let sacrifice = population_sacrifice(quote.cost, config);
    let population = planet.population();
    if sacrifice >= population {
        return Ok(RushOutcome::Rejected(RushRejection::InsufficientPopulation {
            sacrifice,
            population,
        }));
    }

    for _ in 0..sacrifice {
        planet.workforce_mut().remove_by_priority();
    }
    fill_gap(planet, &quote);
    tracing::info!("{} rushed with {} workers", planet.name, sacrifice);
    events.push(Notice::new(
        NoticeKind::Rushed,
        &planet.name,
        format!("{} colonists were worked to death to rush construction", sacrifice),
    ));
    Ok(RushOutcome::SacrificedWorkers { workers: sacrifice })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BuildingId, Coordinate};
    use crate::economy::construction::Project;
    use crate::planet::{Environment, WorkerRole, Workforce};
    use crate::realm::{Government, Race};

    fn setup(government: Government) -> (Planet, Realm, ContentRegistry, EconomyConfig) {
        let mut realm = Realm::new(0, "Terran League", Race::new(1, "Terran"), government);
        let mut planet = Planet::new("Aurora", Coordinate::new(0, 0), Environment::new(10))
            .with_metal_in_ground(50);
        planet.colonize(&mut realm, 1, &mut Vec::new());
        // basic_factory: 10 metal, 20 production
        planet.set_construction(Some(Project::Building(BuildingId::new("basic_factory"))));
        (planet, realm, ContentRegistry::with_defaults(), EconomyConfig::default())
    }

    #[test]
    fn test_quote_formula() {
        let (mut planet, _realm, content, config) = setup(Government::democracy());
        planet.add_metal(4);
        planet.add_production(15);
        let quote = rush_quote(&planet, &content, &config).unwrap().unwrap();
        assert_eq!(quote.metal_gap, 6);
        assert_eq!(quote.production_gap, 5);
        assert_eq!(quote.cost, 16);
        assert!(quote.feasible);
    }

    #[test]
    fn test_credit_rush_fills_gap_exactly() {
        let (mut planet, mut realm, content, config) = setup(Government::democracy());
        realm.treasury = 100;
        let mut events = Vec::new();

        let outcome = rush_with_credits(&mut planet, &mut realm, &content, &config, &mut events).unwrap();
        assert_eq!(outcome, RushOutcome::PaidCredits { cost: 50 });
        assert_eq!(realm.treasury, 50);
        assert_eq!(planet.metal(), 10);
        assert_eq!(planet.production(), 20);
        assert_eq!(planet.metal_in_ground(), 40);
        // Completion is left to the construction check
        assert_eq!(planet.building_count(), 0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_credit_rush_needs_treasury() {
        let (mut planet, mut realm, content, config) = setup(Government::democracy());
        realm.treasury = 49;
        let outcome = rush_with_credits(&mut planet, &mut realm, &content, &config, &mut Vec::new()).unwrap();
        assert!(matches!(
            outcome,
            RushOutcome::Rejected(RushRejection::InsufficientCredits { cost: 50, .. })
        ));
        assert_eq!(realm.treasury, 49);
        assert_eq!(planet.production(), 0);
    }

    #[test]
    fn test_metal_gap_limited_by_ground() {
        let (mut planet, mut realm, content, config) = setup(Government::democracy());
        realm.treasury = 1000;
        planet.mine_metal(45);
        let outcome = rush_with_credits(&mut planet, &mut realm, &content, &config, &mut Vec::new()).unwrap();
        assert_eq!(outcome, RushOutcome::Rejected(RushRejection::NotEnoughMetalInGround));
    }

    #[test]
    fn test_permission_required() {
        let (mut planet, mut realm, content, config) = setup(Government::democracy());
        planet.set_workforce(Workforce::new().with(WorkerRole::Farmer, 5));
        let outcome =
            rush_with_population(&mut planet, &mut realm, &content, &config, &mut Vec::new()).unwrap();
        assert_eq!(outcome, RushOutcome::Rejected(RushRejection::NotPermitted));
    }

    #[test]
    fn test_population_rush() {
        let (mut planet, mut realm, content, config) = setup(Government::empire());
        planet.set_workforce(
            Workforce::new()
                .with(WorkerRole::Farmer, 2)
                .with(WorkerRole::Artist, 1),
        );
        let outcome =
            rush_with_population(&mut planet, &mut realm, &content, &config, &mut Vec::new()).unwrap();
        // cost 50: 50 / 80 + 1
        assert_eq!(outcome, RushOutcome::SacrificedWorkers { workers: 1 });
        assert_eq!(planet.workforce().artists, 0);
        assert_eq!(planet.population(), 2);
        assert_eq!(planet.production(), 20);
    }

    #[test]
    fn test_population_rush_keeps_a_worker() {
        let (mut planet, mut realm, content, config) = setup(Government::empire());
        let outcome =
            rush_with_population(&mut planet, &mut realm, &content, &config, &mut Vec::new()).unwrap();
        assert_eq!(
            outcome,
            RushOutcome::Rejected(RushRejection::InsufficientPopulation {
                sacrifice: 1,
                population: 1
            })
        );
        assert_eq!(planet.population(), 1);
    }

    #[test]
    fn test_nothing_to_rush() {
        let (mut planet, mut realm, content, config) = setup(Government::democracy());
        planet.add_metal(10);
        planet.add_production(20);
        let outcome = rush_with_credits(&mut planet, &mut realm, &content, &config, &mut Vec::new()).unwrap();
        assert_eq!(outcome, RushOutcome::Rejected(RushRejection::NothingToRush));

        planet.set_construction(None);
        assert!(rush_quote(&planet, &content, &config).unwrap().is_none());
    }
}
