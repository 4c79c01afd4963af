//! Flat, serializable snapshot of a planet

use serde::{Deserialize, Serialize};

use crate::content::ContentRegistry;
use crate::core::error::{EconomyError, Result};
use crate::core::types::{BuildingId, Coordinate, LeaderId, RaceId, RealmId, UnitId};
use crate::economy::construction::Project;
use crate::planet::environment::{Environment, Gravity, Temperature, WaterLevel};
use crate::planet::event::PlanetaryEvent;
use crate::planet::planet::Planet;
use crate::planet::status::AppliedStatus;
use crate::planet::workforce::Workforce;

/// Persisted planet layout
///
/// Categories are stored as their numeric codes so the record stays stable
/// when enum variants are renamed. The happiness effect and explanation text
/// are transient and not part of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    pub order_number: u32,
    pub coordinate: Coordinate,
    pub radiation: u8,
    pub gravity: u8,
    pub temperature: u8,
    pub water: u8,
    pub gas_giant: bool,
    pub ground_size: u32,
    pub metal_in_ground: u32,
    pub metal: u32,
    pub production: u32,
    pub extra_food: i32,
    pub culture: u32,
    pub tax: u32,
    pub owner: Option<u32>,
    pub home_world: Option<u32>,
    pub workforce: Workforce,
    pub buildings: Vec<String>,
    pub construction: Option<Project>,
    pub orbital: Option<String>,
    pub governor: Option<u32>,
    pub statuses: Vec<AppliedStatus>,
    pub event: u8,
    pub event_activated: bool,
}

impl PlanetRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Planet {
    pub fn to_record(&self) -> PlanetRecord {
        let env = &self.environment;
        PlanetRecord {
            name: self.name.clone(),
            order_number: self.order_number,
            coordinate: self.coordinate,
            radiation: env.radiation,
            gravity: env.gravity.code(),
            temperature: env.temperature.code(),
            water: env.water.code(),
            gas_giant: env.gas_giant,
            ground_size: env.ground_size,
            metal_in_ground: self.metal_in_ground(),
            metal: self.metal(),
            production: self.production(),
            extra_food: self.extra_food,
            culture: self.culture(),
            tax: self.tax,
            owner: self.owner().map(|r| r.0),
            home_world: self.home_world.map(|r| r.0),
            workforce: *self.workforce(),
            buildings: self.buildings().iter().map(|b| b.0.clone()).collect(),
            construction: self.construction().cloned(),
            orbital: self.orbital.as_ref().map(|u| u.0.clone()),
            governor: self.governor().map(|l| l.0),
            statuses: self.statuses.clone(),
            event: self.event.code(),
            event_activated: self.event_activated,
        }
    }

    /// Rebuild a planet, checking every building and unit id against the registry
    pub fn from_record(record: PlanetRecord, content: &ContentRegistry) -> Result<Self> {
        let gravity = Gravity::from_code(record.gravity)
            .ok_or_else(|| invalid_code("gravity", record.gravity))?;
        let temperature = Temperature::from_code(record.temperature)
            .ok_or_else(|| invalid_code("temperature", record.temperature))?;
        let water = WaterLevel::from_code(record.water)
            .ok_or_else(|| invalid_code("water", record.water))?;
        let event = PlanetaryEvent::from_code(record.event)
            .ok_or_else(|| invalid_code("event", record.event))?;

        let buildings: Vec<BuildingId> = record.buildings.into_iter().map(BuildingId).collect();
        let mut single: Vec<&BuildingId> = Vec::new();
        for id in &buildings {
            if content.building(id)?.single_instance {
                if single.contains(&id) {
                    return Err(EconomyError::InvalidConfig(format!(
                        "planet {} holds {} more than once",
                        record.name, id
                    )));
                }
                single.push(id);
            }
        }

        let orbital = record.orbital.map(UnitId);
        if let Some(id) = &orbital {
            content.unit(id)?;
        }

        match &record.construction {
            Some(Project::Building(id)) => {
                content.building(id)?;
            }
            Some(Project::Unit(id)) => {
                content.unit(id)?;
            }
            Some(Project::Virtual(_)) | None => {}
        }

        let mut environment = Environment::new(record.ground_size)
            .with_gravity(gravity)
            .with_temperature(temperature)
            .with_water(water)
            .with_radiation(record.radiation);
        environment.gas_giant = record.gas_giant;

        if buildings.len() as u32 > environment.ground_size {
            return Err(EconomyError::InvalidConfig(format!(
                "planet {} holds {} buildings on {} ground",
                record.name,
                buildings.len(),
                environment.ground_size
            )));
        }

        let owner = record.owner.map(RealmId);
        if owner.is_some() && record.workforce.is_empty() {
            return Err(EconomyError::InvalidConfig(format!(
                "planet {} is owned but has no population",
                record.name
            )));
        }
        let (workforce, construction, governor) = if owner.is_some() {
            (record.workforce, record.construction, record.governor.map(LeaderId))
        } else {
            (Workforce::default(), None, None)
        };

        let mut planet = Planet::new(&record.name, record.coordinate, environment);
        planet.order_number = record.order_number;
        planet.home_world = record.home_world.map(RaceId);
        planet.extra_food = record.extra_food;
        planet.tax = record.tax;
        planet.orbital = orbital;
        planet.statuses = record.statuses;
        planet.event = event;
        planet.event_activated = record.event_activated;
        planet.restore(
            record.metal_in_ground,
            owner,
            (record.metal, record.production, record.culture),
            workforce,
            buildings,
            construction,
            governor,
        );
        Ok(planet)
    }
}

fn invalid_code(field: &str, code: u8) -> EconomyError {
    EconomyError::InvalidConfig(format!("invalid {} code {}", field, code))
}
