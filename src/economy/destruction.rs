//! Destruction and bombardment - building and population loss under attack
//!
//! Every entry point is a no-op on an unowned planet.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::ContentRegistry;
use crate::core::config::EconomyConfig;
use crate::core::error::Result;
use crate::core::types::BuildingId;
use crate::planet::{Planet, WorkerRole};
use crate::realm::{Notice, NoticeKind, Race};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeKind {
    /// Kills and destroys, culture -2 per hit
    Conventional,
    /// Kills and destroys, raises radiation and halves culture
    Nuclear,
    /// Kills only, culture -10%
    Neutron,
}

/// What a strike took from the planet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NukingRecord {
    pub population_killed: u32,
    pub buildings_destroyed: Vec<BuildingId>,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Nobody to fight
    Unowned,
    /// Defenders held and lost some workers
    Repelled { defenders_lost: u32 },
    /// Colony wiped out; the attacker keeps what is left of its power
    Conquered { remaining_power: u32 },
}

/// Remove the first copy of a building, returns false if nothing was removed
pub fn remove_building(planet: &mut Planet, id: &BuildingId) -> bool {
    if !planet.is_colonized() {
        return false;
    }
    planet.remove_building(id)
}

/// Destroy one random building, preferring ones with upkeep
///
/// Part of its metal cost is recycled by the planet's material bonus.
pub fn destroy_one_building<R: Rng + ?Sized>(
    planet: &mut Planet,
    content: &ContentRegistry,
    rng: &mut R,
    events: &mut Vec<Notice>,
) -> Result<Option<BuildingId>> {
    if !planet.is_colonized() || planet.building_count() == 0 {
        return Ok(None);
    }

    let mut with_upkeep = Vec::new();
    let mut material = 0u32;
    for (index, id) in planet.buildings().iter().enumerate() {
        let building = content.building(id)?;
        if building.upkeep > 0 {
            with_upkeep.push(index);
        }
        material = material.saturating_add(building.material);
    }

    let index = if with_upkeep.is_empty() {
        rng.gen_range(0..planet.buildings().len())
    } else {
        with_upkeep[rng.gen_range(0..with_upkeep.len())]
    };
    let Some(lost) = planet.remove_building_at(index) else {
        return Ok(None);
    };

    let recovered = content.building(&lost)?.metal_cost * material.min(100) / 100;
    planet.add_metal(recovered);

    let name = &content.building(&lost)?.name;
    tracing::info!("{} lost {}", planet.name, name);
    let text = if recovered > 0 {
        format!("{} was destroyed, {} metal recycled", name, recovered)
    } else {
        format!("{} was destroyed", name)
    };
    events.push(Notice::new(NoticeKind::BuildingLost, &planet.name, text));
    Ok(Some(lost))
}

/// Kill one worker of a random role; the colony is abandoned at zero
pub fn kill_one_worker<R: Rng + ?Sized>(
    planet: &mut Planet,
    rng: &mut R,
    events: &mut Vec<Notice>,
) -> Option<WorkerRole> {
    if !planet.is_colonized() {
        return None;
    }
    let role = planet.workforce_mut().remove_random(rng)?;
    events.push(Notice::new(
        NoticeKind::PopulationLost,
        &planet.name,
        format!("A {} was killed", role.name()),
    ));
    if planet.population() == 0 {
        planet.abandon();
        events.push(Notice::new(
            NoticeKind::ColonyAbandoned,
            &planet.name,
            "The colony has been wiped out",
        ));
    }
    Some(role)
}

/// Bombard the planet
///
/// Formula: `hits = max(strike_min_hits, ground_size * strength / 100)`.
/// Each hit kills a worker or destroys a building; neutron strikes only kill.
pub fn apply_strike<R: Rng + ?Sized>(
    planet: &mut Planet,
    strength: u32,
    kind: StrikeKind,
    content: &ContentRegistry,
    config: &EconomyConfig,
    rng: &mut R,
    events: &mut Vec<Notice>,
) -> Result<NukingRecord> {
    let mut record = NukingRecord::default();
    if !planet.is_colonized() {
        return Ok(record);
    }

    let hits = (planet.environment.ground_size.saturating_mul(strength) / 100).max(config.strike_min_hits);
    for _ in 0..hits {
        if !planet.is_colonized() {
            break;
        }
        let can_destroy = kind != StrikeKind::Neutron && planet.building_count() > 0;
        if can_destroy && rng.gen_bool(0.5) {
            if let Some(id) = destroy_one_building(planet, content, rng, events)? {
                record.buildings_destroyed.push(id);
            }
        } else if kill_one_worker(planet, rng, events).is_some() {
            record.population_killed += 1;
        }
    }

    let culture = planet.culture();
    let culture_lost = match kind {
        StrikeKind::Conventional => config.conventional_culture_loss_per_hit.saturating_mul(hits),
        StrikeKind::Nuclear => {
            planet.raise_radiation(config.max_radiation_level);
            culture / 2
        }
        StrikeKind::Neutron => culture * config.neutron_culture_loss_percent / 100,
    };
    planet.change_culture(-(culture_lost.min(culture) as i32));

    record.summary = format!(
        "{:?} strike: {} killed, {} buildings destroyed",
        kind,
        record.population_killed,
        record.buildings_destroyed.len()
    );
    tracing::info!("{}: {}", planet.name, record.summary);
    events.push(Notice::new(NoticeKind::Bombardment, &planet.name, record.summary.clone()));
    Ok(record)
}

/// Ground combat against invading troops
///
/// Defender strength is `population * troop_power + wildlife power`. A
/// stronger attacker wipes out the colony; otherwise the defenders lose
/// `attacker / troop_power` workers and hold with at least one left.
pub fn fight_against_attacker(
    planet: &mut Planet,
    race: &Race,
    attacker_power: u32,
    content: &ContentRegistry,
    events: &mut Vec<Notice>,
) -> Result<AttackOutcome> {
    if !planet.is_colonized() {
        return Ok(AttackOutcome::Unowned);
    }

    let mut wildlife = 0u32;
    for id in planet.buildings() {
        wildlife = wildlife.saturating_add(content.building(id)?.wildlife_power);
    }
    let population = planet.population();
    let defense = population.saturating_mul(race.troop_power).saturating_add(wildlife);

    if attacker_power > defense {
        planet.abandon();
        events.push(Notice::new(
            NoticeKind::GroundCombat,
            &planet.name,
            format!("Invaders overran {} defenders", population),
        ));
        return Ok(AttackOutcome::Conquered {
            remaining_power: attacker_power - defense,
        });
    }

    let losses = (attacker_power / race.troop_power.max(1)).min(population.saturating_sub(1));
    for _ in 0..losses {
        planet.workforce_mut().remove_by_priority();
    }
    events.push(Notice::new(
        NoticeKind::GroundCombat,
        &planet.name,
        format!("Invasion repelled, {} defenders fell", losses),
    ));
    Ok(AttackOutcome::Repelled { defenders_lost: losses })
}
