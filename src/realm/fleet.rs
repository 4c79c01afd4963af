//! Fleets and standing missions

use serde::{Deserialize, Serialize};

use crate::content::UnitRole;
use crate::core::types::{Coordinate, ShipId, UnitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub unit: UnitId,
    pub name: String,
}

impl Ship {
    pub fn new(unit: UnitId, name: &str) -> Self {
        Self {
            id: ShipId::new(),
            unit,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub name: String,
    pub coordinate: Coordinate,
    pub ships: Vec<Ship>,
}

impl Fleet {
    pub fn new(name: &str, coordinate: Coordinate) -> Self {
        Self {
            name: name.to_string(),
            coordinate,
            ships: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionKind {
    Colonize,
    Trade,
    Attack,
    Defend,
    Explore,
}

impl MissionKind {
    /// Whether a freshly built unit of this role serves the mission
    pub fn accepts(self, role: UnitRole) -> bool {
        matches!(
            (self, role),
            (MissionKind::Colonize, UnitRole::Colony)
                | (MissionKind::Trade, UnitRole::Freighter)
                | (MissionKind::Attack, UnitRole::Trooper)
                | (MissionKind::Attack, UnitRole::Warship)
                | (MissionKind::Defend, UnitRole::Warship)
                | (MissionKind::Explore, UnitRole::Scout)
        )
    }

    /// Phase a mission moves to once its unit is built
    pub fn phase_after_build(self) -> MissionPhase {
        match self {
            MissionKind::Colonize | MissionKind::Trade | MissionKind::Attack => {
                MissionPhase::Loading
            }
            MissionKind::Defend | MissionKind::Explore => MissionPhase::Executing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionPhase {
    Planning,
    Building,
    Loading,
    Traveling,
    Executing,
}

/// A standing order, usually issued by AI planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub kind: MissionKind,
    pub phase: MissionPhase,
    /// Planet building the unit, or the planet to act on for defend missions
    pub planet: String,
    pub target: Option<Coordinate>,
    pub fleet: Option<String>,
}

impl Mission {
    pub fn new(kind: MissionKind, planet: &str) -> Self {
        Self {
            kind,
            phase: MissionPhase::Planning,
            planet: planet.to_string(),
            target: None,
            fleet: None,
        }
    }

    /// Still waiting for its unit
    pub fn awaiting_unit(&self) -> bool {
        matches!(self.phase, MissionPhase::Planning | MissionPhase::Building)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_accepts_roles() {
        assert!(MissionKind::Colonize.accepts(UnitRole::Colony));
        assert!(!MissionKind::Colonize.accepts(UnitRole::Warship));
        assert!(MissionKind::Attack.accepts(UnitRole::Trooper));
        assert!(MissionKind::Explore.accepts(UnitRole::Scout));
    }

    #[test]
    fn test_phase_after_build() {
        assert_eq!(MissionKind::Colonize.phase_after_build(), MissionPhase::Loading);
        assert_eq!(MissionKind::Defend.phase_after_build(), MissionPhase::Executing);
    }

    #[test]
    fn test_new_mission_awaits_unit() {
        let mut mission = Mission::new(MissionKind::Colonize, "Aurora I");
        assert!(mission.awaiting_unit());
        mission.phase = MissionPhase::Loading;
        assert!(!mission.awaiting_unit());
    }
}
