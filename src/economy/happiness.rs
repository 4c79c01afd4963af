//! Happiness engine - signed happiness score and the weighted effect roll
//!
//! The roll is a pure function of `(h, draw)`. Each happiness band has a
//! bucket table of cumulative upper bounds over a draw in `0..100`; a draw
//! past the last bound yields no effect.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::{ContentRegistry, ProductionCategory};
use crate::core::error::Result;
use crate::economy::destruction::{destroy_one_building, kill_one_worker};
use crate::planet::Planet;
use crate::realm::{Notice, NoticeKind, Realm};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HappinessBonus {
    #[default]
    None,
    Production,
    Credit,
    Food,
    Metal,
    Culture,
    KillPopulation,
    DestroyBuilding,
}

/// Rolled happiness effect with its signed magnitude
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HappinessEffect {
    pub bonus: HappinessBonus,
    pub magnitude: i32,
}

type Bucket = (u32, HappinessBonus, i32);

use self::HappinessBonus::{Credit, Culture, DestroyBuilding, KillPopulation, Metal, Production};

const HAPPY_1: &[Bucket] = &[(10, Production, 1), (20, Credit, 1), (25, Culture, 1)];
const HAPPY_2: &[Bucket] = &[
    (15, Production, 1),
    (30, Credit, 1),
    (40, Metal, 1),
    (45, Culture, 1),
];
const HAPPY_3: &[Bucket] = &[
    (15, Production, 1),
    (30, Credit, 1),
    (40, Metal, 1),
    (50, Culture, 1),
    (55, Production, 2),
    (60, Credit, 2),
];
const HAPPY_4: &[Bucket] = &[
    (20, Production, 2),
    (40, Credit, 2),
    (55, Metal, 2),
    (70, Culture, 2),
];
const UNHAPPY_1: &[Bucket] = &[(10, Production, -1), (20, Credit, -1)];
const UNHAPPY_2: &[Bucket] = &[
    (15, Production, -1),
    (30, Credit, -1),
    (40, Metal, -1),
    (45, Culture, -1),
];
const UNHAPPY_3: &[Bucket] = &[
    (15, Production, -2),
    (30, Credit, -1),
    (40, Metal, -1),
    (50, KillPopulation, -1),
];
const UNHAPPY_4: &[Bucket] = &[
    (15, Production, -2),
    (30, Credit, -2),
    (40, Metal, -2),
    (55, KillPopulation, -1),
    (70, DestroyBuilding, -1),
];

impl HappinessEffect {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(bonus: HappinessBonus, magnitude: i32) -> Self {
        Self { bonus, magnitude }
    }

    pub fn is_none(&self) -> bool {
        self.bonus == HappinessBonus::None
    }

    /// Production category the effect modifies, if it is a yield effect
    pub fn category(&self) -> Option<ProductionCategory> {
        match self.bonus {
            HappinessBonus::Production => Some(ProductionCategory::Production),
            HappinessBonus::Credit => Some(ProductionCategory::Credits),
            HappinessBonus::Food => Some(ProductionCategory::Food),
            HappinessBonus::Metal => Some(ProductionCategory::Metal),
            HappinessBonus::Culture => Some(ProductionCategory::Culture),
            HappinessBonus::None | HappinessBonus::KillPopulation | HappinessBonus::DestroyBuilding => {
                None
            }
        }
    }

    /// Map a happiness score and a draw in `0..100` to an effect
    ///
    /// `h = 0` is always calm. Killing population needs `h <= -3` and
    /// destroying a building `h <= -4`.
    pub fn from_roll(h: i32, draw: u32) -> Self {
        let table = match h {
            0 => return Self::none(),
            1 => HAPPY_1,
            2 => HAPPY_2,
            3 => HAPPY_3,
            h if h >= 4 => HAPPY_4,
            -1 => UNHAPPY_1,
            -2 => UNHAPPY_2,
            -3 => UNHAPPY_3,
            _ => UNHAPPY_4,
        };
        table
            .iter()
            .find(|(bound, _, _)| draw < *bound)
            .map(|&(_, bonus, magnitude)| Self::new(bonus, magnitude))
            .unwrap_or_default()
    }

    pub fn describe(&self) -> String {
        match self.bonus {
            HappinessBonus::None => "The population is calm".into(),
            HappinessBonus::KillPopulation => "Riots claimed a colonist".into(),
            HappinessBonus::DestroyBuilding => "Rioters destroyed a building".into(),
            _ => {
                let category = self.category().map(|c| c.name()).unwrap_or("output");
                if self.magnitude > 0 {
                    format!("Content citizens raise {} by {}", category, self.magnitude)
                } else {
                    format!("Unrest lowers {} by {}", category, -self.magnitude)
                }
            }
        }
    }
}

/// Signed happiness of a planet under its owner
///
/// Governments immune to happiness always score 0. Unowned planets score 0.
pub fn calculate_happiness(planet: &Planet, realm: &Realm, content: &ContentRegistry) -> Result<i32> {
    let government = &realm.government;
    if government.immune_to_happiness || !planet.is_colonized() {
        return Ok(0);
    }

    let mut h = government.base_happiness;
    if realm.at_war {
        h += government.war_happiness;
    }
    h -= (planet.population() / 5) as i32;
    h += planet.workforce().artists as i32;

    for id in planet.buildings() {
        h += content.building(id)?.happiness;
    }
    h += planet.statuses.iter().map(|s| s.happiness).sum::<i32>();
    h += realm.war_fatigue;

    if let Some(governor) = planet.governor() {
        h += government.governor_happiness;
        if let Some(leader) = realm.leader(governor) {
            h += leader.happiness_bonus();
        }
    }
    if let Some(ruler) = realm.ruler() {
        h += ruler.happiness_bonus();
    }

    tracing::debug!("{} happiness {}", planet.name, h);
    Ok(h)
}

/// Draw an effect for the score; a calm planet consumes no randomness
pub fn roll_effect<R: Rng + ?Sized>(h: i32, rng: &mut R) -> HappinessEffect {
    if h == 0 {
        return HappinessEffect::none();
    }
    HappinessEffect::from_roll(h, rng.gen_range(0..100))
}

/// Apply a freshly rolled effect to the planet
///
/// Yield effects are stored for the next production computation. Killing
/// and destroying happen now and leave no stored effect behind.
pub fn apply_happiness_effect<R: Rng + ?Sized>(
    planet: &mut Planet,
    effect: HappinessEffect,
    content: &ContentRegistry,
    rng: &mut R,
    events: &mut Vec<Notice>,
) -> Result<()> {
    match effect.bonus {
        HappinessBonus::None => {
            planet.happiness_effect = HappinessEffect::none();
        }
        HappinessBonus::KillPopulation => {
            planet.happiness_effect = HappinessEffect::none();
            kill_one_worker(planet, rng, events);
        }
        HappinessBonus::DestroyBuilding => {
            planet.happiness_effect = HappinessEffect::none();
            destroy_one_building(planet, content, rng, events)?;
        }
        _ => {
            planet.happiness_effect = effect;
            events.push(Notice::new(NoticeKind::HappinessEffect, &planet.name, effect.describe()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BuildingId, Coordinate};
    use crate::planet::{Environment, WorkerRole};
    use crate::realm::{Government, Leader, Perk, Race};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (Planet, Realm, ContentRegistry) {
        let mut realm = Realm::new(0, "Terran League", Race::new(1, "Terran"), Government::democracy());
        let mut planet = Planet::new("Aurora", Coordinate::new(0, 0), Environment::new(10));
        planet.colonize(&mut realm, 1, &mut Vec::new());
        (planet, realm, ContentRegistry::with_defaults())
    }

    #[test]
    fn test_zero_is_calm() {
        for draw in 0..100 {
            assert!(HappinessEffect::from_roll(0, draw).is_none());
        }
    }

    #[test]
    fn test_roll_deterministic() {
        for h in -6..=6 {
            for draw in 0..100 {
                assert_eq!(HappinessEffect::from_roll(h, draw), HappinessEffect::from_roll(h, draw));
            }
        }
    }

    #[test]
    fn test_destructive_effects_gated_by_score() {
        for h in -2..=6 {
            for draw in 0..100 {
                let bonus = HappinessEffect::from_roll(h, draw).bonus;
                assert_ne!(bonus, HappinessBonus::KillPopulation);
                assert_ne!(bonus, HappinessBonus::DestroyBuilding);
            }
        }
        for draw in 0..100 {
            assert_ne!(HappinessEffect::from_roll(-3, draw).bonus, HappinessBonus::DestroyBuilding);
        }
        assert_eq!(HappinessEffect::from_roll(-3, 45).bonus, HappinessBonus::KillPopulation);
        assert_eq!(HappinessEffect::from_roll(-4, 60).bonus, HappinessBonus::DestroyBuilding);
        assert_eq!(HappinessEffect::from_roll(-9, 60).bonus, HappinessBonus::DestroyBuilding);
    }

    #[test]
    fn test_sign_follows_score() {
        for draw in 0..100 {
            assert!(HappinessEffect::from_roll(4, draw).magnitude >= 0);
            assert!(HappinessEffect::from_roll(-2, draw).magnitude <= 0);
        }
        assert_eq!(
            HappinessEffect::from_roll(4, 0),
            HappinessEffect::new(HappinessBonus::Production, 2)
        );
        assert!(HappinessEffect::from_roll(1, 99).is_none());
    }

    #[test]
    fn test_calculate_happiness_terms() {
        let (mut planet, mut realm, content) = setup();
        // Democracy base 1
        assert_eq!(calculate_happiness(&planet, &realm, &content).unwrap(), 1);

        planet.add_worker(WorkerRole::Artist);
        let culture = content.building(&BuildingId::new("culture_center")).unwrap();
        planet.install_building(culture).unwrap();
        // 1 + 1 artist + 1 building
        assert_eq!(calculate_happiness(&planet, &realm, &content).unwrap(), 3);

        realm.at_war = true;
        realm.war_fatigue = -2;
        // war -1, fatigue -2
        assert_eq!(calculate_happiness(&planet, &realm, &content).unwrap(), 0);

        let ruler = realm.add_leader(Leader::new(1, "Tyrant").with_perk(Perk::Cruel));
        realm.ruler = Some(ruler);
        let governor = realm.add_leader(Leader::new(2, "Kind").with_perk(Perk::GoodLeader));
        planet.assign_governor(governor);
        assert_eq!(calculate_happiness(&planet, &realm, &content).unwrap(), 0);
    }

    #[test]
    fn test_population_lowers_happiness() {
        let (mut planet, realm, content) = setup();
        planet.add_worker(WorkerRole::Farmer);
        planet.add_worker(WorkerRole::Farmer);
        planet.add_worker(WorkerRole::Farmer);
        planet.add_worker(WorkerRole::Farmer);
        // population 5: 1 - 1
        assert_eq!(calculate_happiness(&planet, &realm, &content).unwrap(), 0);
    }

    #[test]
    fn test_immune_government() {
        let (mut planet, mut realm, content) = setup();
        realm.government = Government::hive_mind();
        realm.war_fatigue = -10;
        planet.add_worker(WorkerRole::Artist);
        assert_eq!(calculate_happiness(&planet, &realm, &content).unwrap(), 0);
    }

    #[test]
    fn test_yield_effect_stored() {
        let (mut planet, _realm, content) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let effect = HappinessEffect::new(HappinessBonus::Credit, -1);

        apply_happiness_effect(&mut planet, effect, &content, &mut rng, &mut events).unwrap();
        assert_eq!(planet.happiness_effect, effect);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, NoticeKind::HappinessEffect);
    }

    #[test]
    fn test_destroy_effect_applied_immediately() {
        let (mut planet, _realm, content) = setup();
        let farm = content.building(&BuildingId::new("basic_farm")).unwrap();
        planet.install_building(farm).unwrap();
        planet.install_building(farm).unwrap();
        planet.happiness_effect = HappinessEffect::new(HappinessBonus::Production, 1);

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut events = Vec::new();
        let effect = HappinessEffect::from_roll(-4, 60);
        apply_happiness_effect(&mut planet, effect, &content, &mut rng, &mut events).unwrap();

        assert_eq!(planet.building_count(), 1);
        assert_eq!(events.len(), 1);
        assert!(planet.happiness_effect.is_none());
    }
}
