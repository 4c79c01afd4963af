//! Turn orchestration - one planet, one turn, stages in fixed order
//!
//! 1. Yields from the production ledger
//! 2. Stockpiles: metal dug from the ground, credits net of upkeep to the treasury
//! 3. Population update
//! 4. Happiness roll and its immediate effects
//! 5. Construction check
//! 6. Status countdown
//! 7. Governor experience
//! 8. Notices appended to the realm log

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::ContentRegistry;
use crate::core::config::EconomyConfig;
use crate::core::error::{EconomyError, Result};
use crate::economy::construction::{check_construction, ConstructionOutcome, ProjectSelector};
use crate::economy::happiness::{apply_happiness_effect, calculate_happiness, roll_effect, HappinessEffect};
use crate::economy::population::{update_population, PopulationState};
use crate::economy::production::{building_upkeep, yields, Yields};
use crate::planet::status::tick_statuses;
use crate::planet::Planet;
use crate::realm::{Notice, NoticeKind, Realm};

/// Everything a turn needs besides the planet itself
pub struct TurnContext<'a, R: Rng + ?Sized> {
    pub realm: &'a mut Realm,
    pub content: &'a ContentRegistry,
    pub config: &'a EconomyConfig,
    pub selector: &'a mut dyn ProjectSelector,
    pub rng: &'a mut R,
    /// Hostile ships in orbit block unit launches
    pub enemy_fleet_present: bool,
}

/// Summary of one planet turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub planet: String,
    pub yields: Yields,
    pub upkeep: u32,
    pub happiness: i32,
    pub effect: HappinessEffect,
    pub population: PopulationState,
    #[serde(skip)]
    pub construction: Option<ConstructionOutcome>,
    pub notices: Vec<Notice>,
}

impl TurnReport {
    fn idle(planet: &Planet) -> Self {
        Self {
            planet: planet.name.clone(),
            yields: Yields::default(),
            upkeep: 0,
            happiness: 0,
            effect: HappinessEffect::none(),
            population: PopulationState::Stable,
            construction: None,
            notices: Vec::new(),
        }
    }
}

/// Advance a planet by one turn
///
/// An unowned planet is left untouched. A planet owned by another realm is
/// an error. Configuration errors abort the turn after being logged to the
/// realm as a diagnostic notice.
pub fn advance_one_turn<R: Rng + ?Sized>(planet: &mut Planet, ctx: &mut TurnContext<'_, R>) -> Result<TurnReport> {
    let mut report = TurnReport::idle(planet);
    let Some(owner) = planet.owner() else {
        return Ok(report);
    };
    if owner != ctx.realm.id {
        return Err(EconomyError::OwnerMismatch {
            planet: planet.name.clone(),
            realm: ctx.realm.id.0,
        });
    }

    match run_stages(planet, ctx, &mut report) {
        Ok(()) => {
            ctx.realm.log_all(&report.notices);
            Ok(report)
        }
        Err(e) => {
            tracing::error!("{}: turn aborted: {}", planet.name, e);
            ctx.realm.log_all(&report.notices);
            ctx.realm.log(Notice::new(
                NoticeKind::ConfigurationError,
                &planet.name,
                e.to_string(),
            ));
            Err(e)
        }
    }
}

fn run_stages<R: Rng + ?Sized>(
    planet: &mut Planet,
    ctx: &mut TurnContext<'_, R>,
    report: &mut TurnReport,
) -> Result<()> {
    let events = &mut report.notices;

    // Yields
    let turn_yields = yields(planet, ctx.realm, ctx.content, ctx.config)?;
    report.yields = turn_yields;

    // Stockpiles
    let mined = planet.mine_metal(turn_yields.metal.max(0) as u32);
    planet.add_metal(mined);
    planet.change_production(turn_yields.production);
    planet.change_culture(turn_yields.culture);
    let upkeep = building_upkeep(planet, ctx.content)?;
    report.upkeep = upkeep;
    ctx.realm
        .add_credits(turn_yields.credits.saturating_sub(upkeep.min(i32::MAX as u32) as i32));

    // Population
    report.population = update_population(planet, ctx.realm, turn_yields.population_delta, ctx.config, events);

    // Happiness
    if planet.is_colonized() {
        let h = calculate_happiness(planet, ctx.realm, ctx.content)?;
        let effect = roll_effect(h, &mut *ctx.rng);
        report.happiness = h;
        report.effect = effect;
        apply_happiness_effect(planet, effect, ctx.content, &mut *ctx.rng, events)?;
        if !planet.is_colonized() {
            report.population = PopulationState::Abandoned;
        }
    }

    // Construction
    if planet.is_colonized() {
        let outcome = check_construction(
            planet,
            ctx.realm,
            ctx.content,
            ctx.config,
            &mut *ctx.selector,
            ctx.enemy_fleet_present,
            events,
        )?;
        report.construction = Some(outcome);
    }

    // Statuses
    for expired in tick_statuses(&mut planet.statuses) {
        events.push(Notice::new(
            NoticeKind::StatusExpired,
            &planet.name,
            format!("{} has ended", expired.name),
        ));
    }

    // Governor
    if let Some(leader) = planet.governor().and_then(|id| ctx.realm.leader_mut(id)) {
        leader.experience += 1;
    }

    tracing::debug!(
        "{} turn done: population {}, metal {}, production {}",
        planet.name,
        planet.population(),
        planet.metal(),
        planet.production()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BuildingId, Coordinate};
    use crate::economy::construction::{FirstAvailableSelector, Project};
    use crate::planet::{AppliedStatus, Environment, WaterLevel};
    use crate::realm::{Government, Leader, Race};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (Planet, Realm, ContentRegistry, EconomyConfig) {
        let mut realm = Realm::new(0, "Hive", Race::new(1, "Drone"), Government::hive_mind());
        let mut planet = Planet::new(
            "Aurora",
            Coordinate::new(0, 0),
            Environment::new(10).with_water(WaterLevel::Ocean),
        )
        .with_metal_in_ground(100);
        planet.colonize(&mut realm, 1, &mut Vec::new());
        (planet, realm, ContentRegistry::with_defaults(), EconomyConfig::default())
    }

    fn turn(planet: &mut Planet, realm: &mut Realm, content: &ContentRegistry, config: &EconomyConfig) -> TurnReport {
        let mut selector = FirstAvailableSelector;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ctx = TurnContext {
            realm,
            content,
            config,
            selector: &mut selector,
            rng: &mut rng,
            enemy_fleet_present: false,
        };
        advance_one_turn(planet, &mut ctx).unwrap()
    }

    #[test]
    fn test_stockpiles_accumulate() {
        let (mut planet, mut realm, content, config) = setup();
        let report = turn(&mut planet, &mut realm, &content, &config);
        assert_eq!(report.yields.metal, 1);
        assert_eq!(report.yields.production, 1);
        assert_eq!(planet.metal(), 1);
        assert_eq!(planet.production(), 1);
        assert_eq!(planet.metal_in_ground(), 99);
        // Hive mind: no happiness
        assert_eq!(report.happiness, 0);
        assert!(report.effect.is_none());
    }

    #[test]
    fn test_upkeep_charged_to_treasury() {
        let (mut planet, mut realm, content, config) = setup();
        let center = content.building(&BuildingId::new("culture_center")).unwrap();
        planet.install_building(center).unwrap();
        realm.treasury = 5;
        let report = turn(&mut planet, &mut realm, &content, &config);
        assert_eq!(report.upkeep, 1);
        assert_eq!(realm.treasury, 4);
    }

    #[test]
    fn test_governor_gains_experience() {
        let (mut planet, mut realm, content, config) = setup();
        let id = realm.add_leader(Leader::new(1, "Vela"));
        planet.assign_governor(id);
        turn(&mut planet, &mut realm, &content, &config);
        turn(&mut planet, &mut realm, &content, &config);
        assert_eq!(realm.leader(id).unwrap().experience, 2);
    }

    #[test]
    fn test_status_expiry_logged() {
        let (mut planet, mut realm, content, config) = setup();
        planet.statuses.push(AppliedStatus::timed("festival", "Festival", 1));
        let report = turn(&mut planet, &mut realm, &content, &config);
        assert!(planet.statuses.is_empty());
        assert!(report.notices.iter().any(|n| n.kind == NoticeKind::StatusExpired));
        assert_eq!(realm.messages.of_kind(NoticeKind::StatusExpired).count(), 1);
    }

    #[test]
    fn test_unowned_planet_untouched() {
        let (mut planet, mut realm, content, config) = setup();
        planet.abandon();
        let report = turn(&mut planet, &mut realm, &content, &config);
        assert_eq!(report.yields, Yields::default());
        assert_eq!(planet.metal_in_ground(), 100);
        assert!(realm.messages.is_empty());
    }

    #[test]
    fn test_foreign_planet_rejected() {
        let (mut planet, _realm, content, config) = setup();
        let mut other = Realm::new(9, "Other", Race::new(1, "Drone"), Government::democracy());
        let mut selector = FirstAvailableSelector;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = TurnContext {
            realm: &mut other,
            content: &content,
            config: &config,
            selector: &mut selector,
            rng: &mut rng,
            enemy_fleet_present: false,
        };
        assert!(matches!(
            advance_one_turn(&mut planet, &mut ctx),
            Err(EconomyError::OwnerMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_blueprint_logged_and_returned() {
        let (mut planet, mut realm, content, config) = setup();
        planet.set_construction(Some(Project::Building(BuildingId::new("moon_laser"))));
        let mut selector = FirstAvailableSelector;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = TurnContext {
            realm: &mut realm,
            content: &content,
            config: &config,
            selector: &mut selector,
            rng: &mut rng,
            enemy_fleet_present: false,
        };
        let err = advance_one_turn(&mut planet, &mut ctx).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(realm.messages.of_kind(NoticeKind::ConfigurationError).count(), 1);
    }
}
