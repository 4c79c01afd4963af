//! Population state machine - growth and starvation through the extra food accumulator

use serde::{Deserialize, Serialize};

use crate::core::config::EconomyConfig;
use crate::planet::{Planet, WorkerRole};
use crate::realm::{Notice, NoticeKind, Race, Realm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationState {
    Stable,
    Growing,
    Starving,
    Overpopulated,
    /// Terminal: the planet has no owner any more
    Abandoned,
}

/// Accumulator needed to gain a worker, `growth_base / growth_speed`
///
/// None for races that never grow.
pub fn growth_threshold(race: &Race, config: &EconomyConfig) -> Option<i32> {
    if race.growth_speed == 0 {
        return None;
    }
    Some((config.growth_base / race.growth_speed as i32).max(1))
}

/// Role a new worker takes
///
/// Lithovorian colonies fill whichever role is scarcest, starting with
/// miners on ties. Everyone else farms.
pub fn growth_role(planet: &Planet, race: &Race) -> WorkerRole {
    if !race.is_lithovorian() {
        return WorkerRole::Farmer;
    }
    const ORDER: [WorkerRole; 5] = [
        WorkerRole::Miner,
        WorkerRole::ProductionWorker,
        WorkerRole::Scientist,
        WorkerRole::Artist,
        WorkerRole::Farmer,
    ];
    let workforce = planet.workforce();
    ORDER
        .into_iter()
        .min_by_key(|role| workforce.get(*role))
        .unwrap_or(WorkerRole::Miner)
}

/// Advance the accumulator by `delta` and apply growth, starvation or overpopulation
///
/// A no-op on an unowned planet.
pub fn update_population(
    planet: &mut Planet,
    realm: &mut Realm,
    delta: i32,
    config: &EconomyConfig,
    events: &mut Vec<Notice>,
) -> PopulationState {
    if !planet.is_colonized() {
        return PopulationState::Stable;
    }

    let limit = planet.population_limit(&realm.race);

    if realm.race.is_self_replicating() {
        return self_replicating_update(planet, limit, config, events);
    }

    let threshold = growth_threshold(&realm.race, config);
    let require = threshold.unwrap_or((config.growth_base / 100).max(1));

    planet.extra_food = planet.extra_food.saturating_add(delta);
    let population = planet.population();

    if population > limit {
        planet.extra_food = planet.extra_food.min(require) - 1;
        let surplus = population - limit;
        for _ in 0..surplus {
            planet.workforce_mut().remove_by_priority();
        }
        tracing::info!("{} overpopulated, lost {} workers", planet.name, surplus);
        events.push(Notice::new(
            NoticeKind::Overpopulation,
            &planet.name,
            format!("Overcrowding drove away {} colonists", surplus),
        ));
        if planet.population() == 0 {
            abandon(planet, events);
            return PopulationState::Abandoned;
        }
        return PopulationState::Overpopulated;
    }

    if planet.extra_food <= -require {
        planet.extra_food = 0;
        let lost = planet.workforce_mut().remove_by_priority();
        tracing::info!("{} is starving, lost {:?}", planet.name, lost);
        let role = lost.map(|r| r.name()).unwrap_or("colonist");
        events.push(Notice::new(
            NoticeKind::Starvation,
            &planet.name,
            format!("A {} starved to death", role),
        ));
        if planet.population() == 0 {
            abandon(planet, events);
            return PopulationState::Abandoned;
        }
        return PopulationState::Starving;
    }

    if population >= limit {
        planet.extra_food = planet.extra_food.min(require);
        return PopulationState::Stable;
    }

    match threshold {
        Some(require) if planet.extra_food >= require => {
            planet.extra_food -= require;
            let role = growth_role(planet, &realm.race);
            planet.workforce_mut().add(role, 1);
            if let Some(leader) = planet.governor().and_then(|id| realm.leader_mut(id)) {
                leader.stats.population_growth += 1;
            }
            tracing::info!("{} grew a new {}", planet.name, role.name());
            events.push(Notice::new(
                NoticeKind::Growth,
                &planet.name,
                format!("A new {} joined the colony", role.name()),
            ));
            PopulationState::Growing
        }
        _ => PopulationState::Stable,
    }
}

/// Races without food or growth skip the accumulator; one worker a turn
/// breaks down while over the limit and half its metal is recovered
fn self_replicating_update(
    planet: &mut Planet,
    limit: u32,
    config: &EconomyConfig,
    events: &mut Vec<Notice>,
) -> PopulationState {
    if planet.population() <= limit {
        return PopulationState::Stable;
    }
    planet.workforce_mut().remove_by_priority();
    let recovered = config.citizen_metal_cost / 2;
    planet.add_metal(recovered);
    events.push(Notice::new(
        NoticeKind::Overpopulation,
        &planet.name,
        format!("An idle citizen was dismantled for {} metal", recovered),
    ));
    if planet.population() == 0 {
        abandon(planet, events);
        return PopulationState::Abandoned;
    }
    PopulationState::Overpopulated
}

fn abandon(planet: &mut Planet, events: &mut Vec<Notice>) {
    planet.abandon();
    events.push(Notice::new(
        NoticeKind::ColonyAbandoned,
        &planet.name,
        "The last colonists are gone",
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Coordinate, LeaderId};
    use crate::economy::construction::Project;
    use crate::planet::{Environment, Workforce};
    use crate::realm::{Government, Leader};

    fn setup() -> (Planet, Realm, EconomyConfig) {
        let mut realm = Realm::new(0, "Terran League", Race::new(1, "Terran"), Government::democracy());
        let mut planet = Planet::new("Aurora", Coordinate::new(0, 0), Environment::new(10));
        planet.colonize(&mut realm, 1, &mut Vec::new());
        (planet, realm, EconomyConfig::default())
    }

    #[test]
    fn test_threshold() {
        let config = EconomyConfig::default();
        let mut race = Race::new(1, "Terran");
        assert_eq!(growth_threshold(&race, &config), Some(10));
        race.growth_speed = 50;
        assert_eq!(growth_threshold(&race, &config), Some(20));
        race.growth_speed = 0;
        assert_eq!(growth_threshold(&race, &config), None);
    }

    #[test]
    fn test_growth_after_threshold() {
        let (mut planet, mut realm, config) = setup();
        let governor = realm.add_leader(Leader::new(1, "Vela"));
        planet.assign_governor(governor);
        let mut events = Vec::new();

        for _ in 0..3 {
            let state = update_population(&mut planet, &mut realm, 3, &config, &mut events);
            assert_eq!(state, PopulationState::Stable);
        }
        assert_eq!(planet.population(), 1);

        let state = update_population(&mut planet, &mut realm, 3, &config, &mut events);
        assert_eq!(state, PopulationState::Growing);
        assert_eq!(planet.population(), 2);
        assert_eq!(planet.workforce().farmers, 2);
        assert_eq!(planet.extra_food, 2);
        assert_eq!(events.len(), 1);
        assert_eq!(realm.leader(governor).unwrap().stats.population_growth, 1);
    }

    #[test]
    fn test_starvation_priority() {
        let (mut planet, mut realm, config) = setup();
        planet.set_workforce(
            Workforce::new()
                .with(WorkerRole::Farmer, 1)
                .with(WorkerRole::Artist, 1),
        );
        let mut events = Vec::new();
        let state = update_population(&mut planet, &mut realm, -10, &config, &mut events);
        assert_eq!(state, PopulationState::Starving);
        assert_eq!(planet.workforce().artists, 0);
        assert_eq!(planet.extra_food, 0);
        assert_eq!(events[0].kind, NoticeKind::Starvation);
    }

    #[test]
    fn test_starvation_abandons_colony() {
        let (mut planet, mut realm, config) = setup();
        planet.assign_governor(LeaderId(1));
        planet.set_construction(Some(Project::Building(crate::core::types::BuildingId::new("basic_farm"))));
        let mut events = Vec::new();

        let state = update_population(&mut planet, &mut realm, -12, &config, &mut events);
        assert_eq!(state, PopulationState::Abandoned);
        assert!(!planet.is_colonized());
        assert!(planet.governor().is_none());
        assert!(planet.construction().is_none());
        assert!(events.iter().any(|e| e.kind == NoticeKind::ColonyAbandoned));
    }

    #[test]
    fn test_overpopulation_trims_to_limit() {
        let (mut planet, mut realm, config) = setup();
        planet.set_workforce(Workforce::new().with(WorkerRole::Farmer, 12));
        planet.extra_food = 30;
        let mut events = Vec::new();

        let state = update_population(&mut planet, &mut realm, 0, &config, &mut events);
        assert_eq!(state, PopulationState::Overpopulated);
        assert_eq!(planet.population(), 10);
        assert_eq!(planet.extra_food, 9);
        assert_eq!(events[0].kind, NoticeKind::Overpopulation);
    }

    #[test]
    fn test_full_planet_caps_accumulator() {
        let (mut planet, mut realm, config) = setup();
        planet.set_workforce(Workforce::new().with(WorkerRole::Farmer, 10));
        let mut events = Vec::new();
        update_population(&mut planet, &mut realm, 25, &config, &mut events);
        assert_eq!(planet.population(), 10);
        assert_eq!(planet.extra_food, 10);
        assert!(events.is_empty());
    }

    #[test]
    fn test_self_replicating_overpopulation() {
        let (mut planet, mut realm, config) = setup();
        realm.race = Race::synthetic();
        planet.set_workforce(Workforce::new().with(WorkerRole::ProductionWorker, 12));
        let mut events = Vec::new();

        let state = update_population(&mut planet, &mut realm, 5, &config, &mut events);
        assert_eq!(state, PopulationState::Overpopulated);
        assert_eq!(planet.population(), 11);
        assert_eq!(planet.metal(), 10);
        assert_eq!(planet.extra_food, 0);
    }

    #[test]
    fn test_lithovorian_growth_role() {
        let (mut planet, _realm, _config) = setup();
        let race = Race::lithoid();
        planet.set_workforce(Workforce::new().with(WorkerRole::Miner, 1));
        assert_eq!(growth_role(&planet, &race), WorkerRole::ProductionWorker);
        assert_eq!(growth_role(&planet, &Race::new(1, "Terran")), WorkerRole::Farmer);
    }

    #[test]
    fn test_unowned_is_noop() {
        let (mut planet, mut realm, config) = setup();
        planet.abandon();
        let state = update_population(&mut planet, &mut realm, 50, &config, &mut Vec::new());
        assert_eq!(state, PopulationState::Stable);
        assert_eq!(planet.extra_food, 0);
    }
}
