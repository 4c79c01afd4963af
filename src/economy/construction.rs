//! Construction ledger - the single active project and its completion paths
//!
//! A project completes on the first turn both stockpiles cover its cost.
//! Buildings need ground, units need an unblockaded planet, virtual projects
//! only need the resources.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::{BuildingDef, ContentRegistry, UnitDef};
use crate::core::config::EconomyConfig;
use crate::core::error::Result;
use crate::core::types::{BuildingId, UnitId};
use crate::planet::{InstallRejection, Installed, Planet, WorkerRole};
use crate::realm::{Mission, MissionKind, Notice, NoticeKind, Realm, Ship};

/// Projects with no blueprint behind them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VirtualProject {
    /// Builds one worker out of metal and production
    SelfReplicatingCitizen,
    /// Converts production into culture
    ExtraCulture,
    /// Converts production into treasury credits
    ExtraCredit,
}

impl VirtualProject {
    pub fn name(&self) -> &'static str {
        match self {
            VirtualProject::SelfReplicatingCitizen => "Citizen",
            VirtualProject::ExtraCulture => "Extra culture",
            VirtualProject::ExtraCredit => "Extra credits",
        }
    }
}

/// The active construction of a planet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Project {
    Building(BuildingId),
    Unit(UnitId),
    Virtual(VirtualProject),
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Project::Building(id) => write!(f, "building {}", id),
            Project::Unit(id) => write!(f, "unit {}", id),
            Project::Virtual(kind) => f.write_str(kind.name()),
        }
    }
}

/// Metal and production needed to finish a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCost {
    pub metal: u32,
    pub production: u32,
}

impl ProjectCost {
    pub fn new(metal: u32, production: u32) -> Self {
        Self { metal, production }
    }

    pub fn total(&self) -> u32 {
        self.metal.saturating_add(self.production)
    }
}

/// Why a project could not complete even though it may be affordable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionRejection {
    AtCapacity,
    AlreadyPresent,
    Blockaded,
    /// A citizen would push the colony over its population limit
    PopulationLimit,
}

impl From<InstallRejection> for ConstructionRejection {
    fn from(rejection: InstallRejection) -> Self {
        match rejection {
            InstallRejection::NoFreeSlot => ConstructionRejection::AtCapacity,
            InstallRejection::AlreadyPresent => ConstructionRejection::AlreadyPresent,
        }
    }
}

/// Result of one construction check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionOutcome {
    /// Nothing under construction
    Idle,
    /// Not enough resources yet, retried next turn
    Waiting { missing_metal: u32, missing_production: u32 },
    BuildingCompleted { building: BuildingId, replaced: Option<BuildingId> },
    UnitCompleted { unit: UnitId, fleet: String },
    OrbitalCompleted { unit: UnitId, replaced: Option<UnitId> },
    VirtualCompleted(VirtualProject),
    Rejected(ConstructionRejection),
}

/// Picks the next project when a completed one is not repeated
pub trait ProjectSelector {
    fn select_next(&mut self, planet: &Planet, realm: &Realm, content: &ContentRegistry) -> Option<Project>;
}

/// Chooses the first registered building the planet can still take
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailableSelector;

impl ProjectSelector for FirstAvailableSelector {
    fn select_next(&mut self, planet: &Planet, _realm: &Realm, content: &ContentRegistry) -> Option<Project> {
        content
            .buildings()
            .find(|b| planet.can_install(b).is_ok())
            .map(|b| Project::Building(b.id.clone()))
    }
}

/// Cost of a project on this planet
///
/// An orbital replacing the current orbital is discounted by a share of the
/// current orbital's cost.
pub fn project_cost(
    planet: &Planet,
    project: &Project,
    content: &ContentRegistry,
    config: &EconomyConfig,
) -> Result<ProjectCost> {
    let cost = match project {
        Project::Building(id) => {
            let building = content.building(id)?;
            ProjectCost::new(building.metal_cost, building.production_cost)
        }
        Project::Unit(id) => {
            let unit = content.unit(id)?;
            let mut cost = ProjectCost::new(unit.metal_cost, unit.production_cost);
            if unit.is_orbital() {
                if let Some(current) = &planet.orbital {
                    let current = content.unit(current)?;
                    let percent = config.orbital_discount_percent;
                    cost.metal = cost.metal.saturating_sub(current.metal_cost * percent / 100);
                    cost.production = cost
                        .production
                        .saturating_sub(current.production_cost * percent / 100);
                }
            }
            cost
        }
        Project::Virtual(kind) => match kind {
            VirtualProject::SelfReplicatingCitizen => {
                ProjectCost::new(config.citizen_metal_cost, config.citizen_production_cost)
            }
            VirtualProject::ExtraCulture => ProjectCost::new(0, config.extra_culture_production_cost),
            VirtualProject::ExtraCredit => ProjectCost::new(0, config.extra_credit_production_cost),
        },
    };
    Ok(cost)
}

/// Whether the project could be started on the planet
pub fn can_build(planet: &Planet, realm: &Realm, project: &Project, content: &ContentRegistry) -> Result<bool> {
    if !planet.is_owned_by(realm.id) {
        return Ok(false);
    }
    let allowed = match project {
        Project::Building(id) => planet.can_install(content.building(id)?).is_ok(),
        Project::Unit(id) => {
            content.unit(id)?;
            true
        }
        Project::Virtual(VirtualProject::SelfReplicatingCitizen) => !at_population_limit(planet, realm),
        Project::Virtual(_) => true,
    };
    Ok(allowed)
}

/// Try to finish the active project with the stored resources
///
/// Unknown blueprints are configuration errors and are returned as such.
pub fn check_construction(
    planet: &mut Planet,
    realm: &mut Realm,
    content: &ContentRegistry,
    config: &EconomyConfig,
    selector: &mut dyn ProjectSelector,
    enemy_fleet_present: bool,
    events: &mut Vec<Notice>,
) -> Result<ConstructionOutcome> {
    let project = match planet.construction() {
        Some(project) if planet.is_colonized() => project.clone(),
        _ => return Ok(ConstructionOutcome::Idle),
    };

    let outcome = match &project {
        Project::Building(id) => {
            let building = content.building(id)?;
            if let Err(rejection) = planet.can_install(building) {
                tracing::warn!("{} cannot place {}: {:?}", planet.name, building.name, rejection);
                events.push(Notice::new(
                    NoticeKind::ConstructionRejected,
                    &planet.name,
                    format!("No room to build {}", building.name),
                ));
                return Ok(ConstructionOutcome::Rejected(rejection.into()));
            }
            let cost = project_cost(planet, &project, content, config)?;
            if let Some(waiting) = shortfall(planet, cost) {
                return Ok(waiting);
            }
            complete_building(planet, realm, building, cost, events)
        }
        Project::Unit(id) => {
            let unit = content.unit(id)?;
            if enemy_fleet_present {
                return Ok(reject_blockaded(planet, realm, unit, events));
            }
            let cost = project_cost(planet, &project, content, config)?;
            if let Some(waiting) = shortfall(planet, cost) {
                return Ok(waiting);
            }
            complete_unit(planet, realm, unit, cost, content, events)?
        }
        Project::Virtual(kind) => {
            if *kind == VirtualProject::SelfReplicatingCitizen && at_population_limit(planet, realm) {
                tracing::warn!("{} is at its population limit, no citizen assembled", planet.name);
                events.push(Notice::new(
                    NoticeKind::ConstructionRejected,
                    &planet.name,
                    "No room for another citizen",
                ));
                return Ok(ConstructionOutcome::Rejected(ConstructionRejection::PopulationLimit));
            }
            let cost = project_cost(planet, &project, content, config)?;
            if let Some(waiting) = shortfall(planet, cost) {
                return Ok(waiting);
            }
            complete_virtual(planet, realm, *kind, cost, config, events)
        }
    };

    let repeat = match &project {
        Project::Building(id) => !content.building(id)?.single_instance,
        Project::Unit(id) => !content.unit(id)?.is_orbital(),
        Project::Virtual(VirtualProject::SelfReplicatingCitizen) => !at_population_limit(planet, realm),
        Project::Virtual(_) => true,
    };
    let next = if realm.is_ai || !repeat {
        selector.select_next(planet, realm, content)
    } else {
        Some(project)
    };
    planet.set_construction(next);

    Ok(outcome)
}

fn at_population_limit(planet: &Planet, realm: &Realm) -> bool {
    planet.population() >= planet.population_limit(&realm.race)
}

fn shortfall(planet: &Planet, cost: ProjectCost) -> Option<ConstructionOutcome> {
    let missing_metal = cost.metal.saturating_sub(planet.metal());
    let missing_production = cost.production.saturating_sub(planet.production());
    if missing_metal == 0 && missing_production == 0 {
        None
    } else {
        Some(ConstructionOutcome::Waiting {
            missing_metal,
            missing_production,
        })
    }
}

fn pay(planet: &mut Planet, cost: ProjectCost) {
    planet.take_metal(cost.metal);
    planet.take_production(cost.production);
}

fn complete_building(
    planet: &mut Planet,
    realm: &mut Realm,
    building: &BuildingDef,
    cost: ProjectCost,
    events: &mut Vec<Notice>,
) -> ConstructionOutcome {
    let replaced = match planet.install_building(building) {
        Ok(Installed::NewSlot) => None,
        Ok(Installed::Replaced(old)) => Some(old),
        Err(rejection) => return ConstructionOutcome::Rejected(rejection.into()),
    };
    pay(planet, cost);
    if let Some(leader) = planet.governor().and_then(|id| realm.leader_mut(id)) {
        leader.stats.buildings_built += 1;
    }

    tracing::info!("{} completed {}", planet.name, building.name);
    let text = match &replaced {
        Some(old) => format!("{} replaced {}", building.name, old),
        None => format!("{} completed", building.name),
    };
    events.push(Notice::new(NoticeKind::BuildingCompleted, &planet.name, text));

    ConstructionOutcome::BuildingCompleted {
        building: building.id.clone(),
        replaced,
    }
}

fn reject_blockaded(
    planet: &Planet,
    realm: &mut Realm,
    unit: &UnitDef,
    events: &mut Vec<Notice>,
) -> ConstructionOutcome {
    tracing::warn!("{} is blockaded, {} held back", planet.name, unit.name);
    events.push(Notice::new(
        NoticeKind::ConstructionRejected,
        &planet.name,
        format!("Enemy fleet in orbit, {} cannot launch", unit.name),
    ));
    if realm.is_ai && !realm.has_mission(MissionKind::Defend, &planet.name) {
        let mut mission = Mission::new(MissionKind::Defend, &planet.name);
        mission.target = Some(planet.coordinate);
        realm.missions.push(mission);
    }
    ConstructionOutcome::Rejected(ConstructionRejection::Blockaded)
}

fn complete_unit(
    planet: &mut Planet,
    realm: &mut Realm,
    unit: &UnitDef,
    cost: ProjectCost,
    content: &ContentRegistry,
    events: &mut Vec<Notice>,
) -> Result<ConstructionOutcome> {
    pay(planet, cost);
    if let Some(leader) = planet.governor().and_then(|id| realm.leader_mut(id)) {
        leader.stats.ships_built += 1;
    }

    if unit.is_orbital() {
        let replaced = planet.orbital.replace(unit.id.clone());
        let text = match &replaced {
            Some(old_id) => {
                let old = content.unit(old_id)?;
                if unit.total_cost() >= old.total_cost() {
                    format!("{} upgraded to {}", old.name, unit.name)
                } else {
                    format!("{} downgraded to {}", old.name, unit.name)
                }
            }
            None => format!("{} placed in orbit", unit.name),
        };
        tracing::info!("{}: {}", planet.name, text);
        events.push(Notice::new(NoticeKind::OrbitalChanged, &planet.name, text));
        return Ok(ConstructionOutcome::OrbitalCompleted {
            unit: unit.id.clone(),
            replaced,
        });
    }

    let fleet_name = format!("{} fleet", planet.name);
    let fleet = realm.fleet_at_mut(planet.coordinate, &fleet_name);
    let ship_name = format!("{} {}", unit.name, fleet.len() + 1);
    fleet.ships.push(Ship::new(unit.id.clone(), &ship_name));
    let fleet_name = fleet.name.clone();

    if let Some(mission) = realm
        .missions
        .iter_mut()
        .find(|m| m.planet == planet.name && m.awaiting_unit() && m.kind.accepts(unit.role))
    {
        mission.phase = mission.kind.phase_after_build();
        mission.fleet = Some(fleet_name.clone());
    }

    tracing::info!("{} launched {}", planet.name, ship_name);
    events.push(Notice::new(
        NoticeKind::UnitCompleted,
        &planet.name,
        format!("{} joined {}", ship_name, fleet_name),
    ));
    Ok(ConstructionOutcome::UnitCompleted {
        unit: unit.id.clone(),
        fleet: fleet_name,
    })
}

fn complete_virtual(
    planet: &mut Planet,
    realm: &mut Realm,
    kind: VirtualProject,
    cost: ProjectCost,
    config: &EconomyConfig,
    events: &mut Vec<Notice>,
) -> ConstructionOutcome {
    pay(planet, cost);
    let text = match kind {
        VirtualProject::SelfReplicatingCitizen => {
            planet.add_worker(WorkerRole::ProductionWorker);
            "A new citizen was assembled".to_string()
        }
        VirtualProject::ExtraCulture => {
            planet.add_culture(config.extra_culture_yield);
            format!("Festivals produced {} culture", config.extra_culture_yield)
        }
        VirtualProject::ExtraCredit => {
            realm.add_credits(config.extra_credit_yield);
            format!("Trade produced {} credits", config.extra_credit_yield)
        }
    };
    events.push(Notice::new(NoticeKind::ProjectCompleted, &planet.name, text));
    ConstructionOutcome::VirtualCompleted(kind)
}
