//! Planet - the aggregate root of the colony economy
//!
//! Fields guarding an invariant are private and only change through methods:
//! stockpiles are unsigned and clamp on write, metal-in-ground only decreases,
//! the building list respects ground size and single-instance rules, and an
//! unowned planet never carries workers, a governor or a construction project.

use serde::{Deserialize, Serialize};

use crate::content::BuildingDef;
use crate::core::types::{BuildingId, Coordinate, LeaderId, RaceId, RealmId, UnitId};
use crate::economy::construction::Project;
use crate::economy::happiness::HappinessEffect;
use crate::planet::environment::Environment;
use crate::planet::event::PlanetaryEvent;
use crate::planet::status::AppliedStatus;
use crate::planet::workforce::{WorkerRole, Workforce};
use crate::realm::{Notice, NoticeKind, Race, Realm};

/// Why a building could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallRejection {
    /// Every ground slot is taken
    NoFreeSlot,
    /// Single-instance building already present
    AlreadyPresent,
}

/// How a building was placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installed {
    NewSlot,
    Replaced(BuildingId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub coordinate: Coordinate,
    pub order_number: u32,
    pub environment: Environment,
    metal_in_ground: u32,
    owner: Option<RealmId>,
    /// Race whose home world this is
    pub home_world: Option<RaceId>,
    metal: u32,
    production: u32,
    culture: u32,
    /// Growth/starvation accumulator
    pub extra_food: i32,
    /// Production converted to credits each turn
    pub tax: u32,
    workforce: Workforce,
    buildings: Vec<BuildingId>,
    construction: Option<Project>,
    governor: Option<LeaderId>,
    pub orbital: Option<UnitId>,
    pub statuses: Vec<AppliedStatus>,
    pub event: PlanetaryEvent,
    pub event_activated: bool,
    /// Effect rolled last turn, folded into this turn's production
    pub happiness_effect: HappinessEffect,
}

impl Planet {
    pub fn new(name: &str, coordinate: Coordinate, environment: Environment) -> Self {
        Self {
            name: name.to_string(),
            coordinate,
            order_number: 1,
            environment,
            metal_in_ground: 0,
            owner: None,
            home_world: None,
            metal: 0,
            production: 0,
            culture: 0,
            extra_food: 0,
            tax: 0,
            workforce: Workforce::default(),
            buildings: Vec::new(),
            construction: None,
            governor: None,
            orbital: None,
            statuses: Vec::new(),
            event: PlanetaryEvent::None,
            event_activated: false,
            happiness_effect: HappinessEffect::none(),
        }
    }

    pub fn with_metal_in_ground(mut self, metal: u32) -> Self {
        self.metal_in_ground = metal;
        self
    }

    pub fn with_event(mut self, event: PlanetaryEvent) -> Self {
        self.event = event;
        self
    }

    // === OWNERSHIP ===

    pub fn owner(&self) -> Option<RealmId> {
        self.owner
    }

    pub fn is_colonized(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_owned_by(&self, realm: RealmId) -> bool {
        self.owner == Some(realm)
    }

    /// Hand the planet to a realm, seeding at least one worker
    ///
    /// Activates the planetary event on first colonization. Returns false if
    /// the planet is already owned.
    pub fn colonize(&mut self, realm: &mut Realm, population: u32, events: &mut Vec<Notice>) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(realm.id);
        self.extra_food = 0;
        self.workforce.clear();
        self.workforce.add(seed_role(&realm.race), population.max(1));

        tracing::info!(
            "{} colonized by {} with {} workers",
            self.name,
            realm.name,
            self.workforce.total()
        );

        if !self.event_activated {
            if let Some(activation) = self.event.activation() {
                self.event_activated = true;
                if let Some(status) = activation.status {
                    self.statuses.push(status);
                }
                if activation.artifact {
                    realm.undeciphered_artifacts += 1;
                }
                events.push(Notice::new(NoticeKind::EventActivated, &self.name, activation.text));
            }
        }
        true
    }

    /// Revert to uncolonized: owner, workers, governor and construction cleared
    pub fn abandon(&mut self) {
        tracing::info!("{} has been abandoned", self.name);
        self.owner = None;
        self.workforce.clear();
        self.governor = None;
        self.construction = None;
        self.orbital = None;
        self.extra_food = 0;
        self.tax = 0;
        self.happiness_effect = HappinessEffect::none();
    }

    // === WORKFORCE ===

    pub fn workforce(&self) -> &Workforce {
        &self.workforce
    }

    pub fn population(&self) -> u32 {
        self.workforce.total()
    }

    /// Replace the workforce; ignored on an unowned planet
    pub fn set_workforce(&mut self, workforce: Workforce) -> bool {
        if self.owner.is_none() {
            return false;
        }
        self.workforce = workforce;
        true
    }

    pub fn add_worker(&mut self, role: WorkerRole) -> bool {
        if self.owner.is_none() {
            return false;
        }
        self.workforce.add(role, 1);
        true
    }

    pub(crate) fn workforce_mut(&mut self) -> &mut Workforce {
        &mut self.workforce
    }

    /// Most workers the planet supports for a race
    pub fn population_limit(&self, race: &Race) -> u32 {
        let base = self.environment.ground_size * race.suitability(&self.environment) / 100;
        (base as i32 + race.extra_population).max(0) as u32
    }

    // === STOCKPILES ===

    pub fn metal(&self) -> u32 {
        self.metal
    }

    pub fn production(&self) -> u32 {
        self.production
    }

    pub fn culture(&self) -> u32 {
        self.culture
    }

    pub fn add_metal(&mut self, amount: u32) {
        self.metal = self.metal.saturating_add(amount);
    }

    pub fn add_production(&mut self, amount: u32) {
        self.production = self.production.saturating_add(amount);
    }

    pub fn add_culture(&mut self, amount: u32) {
        self.culture = self.culture.saturating_add(amount);
    }

    /// Apply a signed change to stored metal, clamping at zero
    pub fn change_metal(&mut self, delta: i32) {
        self.metal = apply_delta(self.metal, delta);
    }

    pub fn change_production(&mut self, delta: i32) {
        self.production = apply_delta(self.production, delta);
    }

    pub fn change_culture(&mut self, delta: i32) {
        self.culture = apply_delta(self.culture, delta);
    }

    /// Take up to `amount` metal, returning what was taken
    pub fn take_metal(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.metal);
        self.metal -= taken;
        taken
    }

    pub fn take_production(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.production);
        self.production -= taken;
        taken
    }

    pub fn metal_in_ground(&self) -> u32 {
        self.metal_in_ground
    }

    /// Extract up to `amount` from the ground, returning what was extracted
    pub fn mine_metal(&mut self, amount: u32) -> u32 {
        let mined = amount.min(self.metal_in_ground);
        self.metal_in_ground -= mined;
        mined
    }

    // === BUILDINGS ===

    pub fn buildings(&self) -> &[BuildingId] {
        &self.buildings
    }

    pub fn building_count(&self) -> u32 {
        self.buildings.len() as u32
    }

    pub fn free_slots(&self) -> u32 {
        self.environment.ground_size.saturating_sub(self.building_count())
    }

    pub fn has_building(&self, id: &BuildingId) -> bool {
        self.buildings.contains(id)
    }

    /// Whether the building could be placed right now
    pub fn can_install(&self, building: &BuildingDef) -> Result<(), InstallRejection> {
        if building.single_instance && self.has_building(&building.id) {
            return Err(InstallRejection::AlreadyPresent);
        }
        let replaces_present = building
            .replaces
            .as_ref()
            .is_some_and(|old| self.has_building(old));
        if !replaces_present && self.free_slots() == 0 {
            return Err(InstallRejection::NoFreeSlot);
        }
        Ok(())
    }

    /// Place a building, swapping out the one it replaces if present
    pub fn install_building(&mut self, building: &BuildingDef) -> Result<Installed, InstallRejection> {
        self.can_install(building)?;
        if let Some(old) = &building.replaces {
            if let Some(index) = self.buildings.iter().position(|b| b == old) {
                let replaced = std::mem::replace(&mut self.buildings[index], building.id.clone());
                return Ok(Installed::Replaced(replaced));
            }
        }
        self.buildings.push(building.id.clone());
        Ok(Installed::NewSlot)
    }

    /// Remove the first copy of a building, returns false if absent
    pub fn remove_building(&mut self, id: &BuildingId) -> bool {
        match self.buildings.iter().position(|b| b == id) {
            Some(index) => {
                self.buildings.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_building_at(&mut self, index: usize) -> Option<BuildingId> {
        if index < self.buildings.len() {
            Some(self.buildings.remove(index))
        } else {
            None
        }
    }

    // === CONSTRUCTION ===

    pub fn construction(&self) -> Option<&Project> {
        self.construction.as_ref()
    }

    /// Select the active project; ignored on an unowned planet
    pub fn set_construction(&mut self, project: Option<Project>) -> bool {
        if self.owner.is_none() {
            return false;
        }
        self.construction = project;
        true
    }

    // === GOVERNOR ===

    pub fn governor(&self) -> Option<LeaderId> {
        self.governor
    }

    /// Assign a governor; ignored on an unowned planet
    pub fn assign_governor(&mut self, leader: LeaderId) -> bool {
        if self.owner.is_none() {
            return false;
        }
        self.governor = Some(leader);
        true
    }

    pub fn clear_governor(&mut self) -> Option<LeaderId> {
        self.governor.take()
    }

    // === ENVIRONMENT ===

    /// Raise radiation by one step up to the cap
    pub fn raise_radiation(&mut self, max_level: u8) {
        if self.environment.radiation < max_level {
            self.environment.radiation += 1;
        }
    }

    pub(crate) fn restore(
        &mut self,
        metal_in_ground: u32,
        owner: Option<RealmId>,
        stockpiles: (u32, u32, u32),
        workforce: Workforce,
        buildings: Vec<BuildingId>,
        construction: Option<Project>,
        governor: Option<LeaderId>,
    ) {
        self.metal_in_ground = metal_in_ground;
        self.owner = owner;
        (self.metal, self.production, self.culture) = stockpiles;
        self.workforce = workforce;
        self.buildings = buildings;
        self.construction = construction;
        self.governor = governor;
    }
}

/// First worker of a new colony
fn seed_role(race: &Race) -> WorkerRole {
    if race.is_lithovorian() {
        WorkerRole::Miner
    } else if race.food_requirement == 0 {
        WorkerRole::ProductionWorker
    } else {
        WorkerRole::Farmer
    }
}

fn apply_delta(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta as u32)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
