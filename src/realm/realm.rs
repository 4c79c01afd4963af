//! Realm - the owning player or AI entity

use serde::{Deserialize, Serialize};

use crate::core::types::{Coordinate, LeaderId, RealmId};
use crate::realm::fleet::{Fleet, Mission, MissionKind};
use crate::realm::government::Government;
use crate::realm::leader::Leader;
use crate::realm::message::{MessageLog, Notice};
use crate::realm::race::Race;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Realm {
    pub id: RealmId,
    pub name: String,
    pub race: Race,
    pub government: Government,
    pub is_ai: bool,
    pub treasury: i32,
    pub at_war: bool,
    /// Signed happiness modifier on every planet; negative when tired of war
    pub war_fatigue: i32,
    pub ruler: Option<LeaderId>,
    /// Leader registry; planets refer to governors by id
    pub leaders: Vec<Leader>,
    pub fleets: Vec<Fleet>,
    pub missions: Vec<Mission>,
    pub undeciphered_artifacts: u32,
    pub messages: MessageLog,
}

impl Realm {
    pub fn new(id: u32, name: &str, race: Race, government: Government) -> Self {
        Self {
            id: RealmId(id),
            name: name.to_string(),
            race,
            government,
            is_ai: false,
            treasury: 0,
            at_war: false,
            war_fatigue: 0,
            ruler: None,
            leaders: Vec::new(),
            fleets: Vec::new(),
            missions: Vec::new(),
            undeciphered_artifacts: 0,
            messages: MessageLog::new(),
        }
    }

    pub fn leader(&self, id: LeaderId) -> Option<&Leader> {
        self.leaders.iter().find(|l| l.id == id)
    }

    pub fn leader_mut(&mut self, id: LeaderId) -> Option<&mut Leader> {
        self.leaders.iter_mut().find(|l| l.id == id)
    }

    pub fn ruler(&self) -> Option<&Leader> {
        self.ruler.and_then(|id| self.leader(id))
    }

    pub fn add_leader(&mut self, leader: Leader) -> LeaderId {
        let id = leader.id;
        self.leaders.push(leader);
        id
    }

    /// Deduct credits if the treasury covers them
    pub fn spend_credits(&mut self, amount: u32) -> bool {
        let amount = amount.min(i32::MAX as u32) as i32;
        if self.treasury < amount {
            return false;
        }
        self.treasury -= amount;
        true
    }

    pub fn add_credits(&mut self, amount: i32) {
        self.treasury = self.treasury.saturating_add(amount);
    }

    pub fn log(&mut self, notice: Notice) {
        self.messages.append(notice);
    }

    pub fn log_all(&mut self, notices: &[Notice]) {
        for notice in notices {
            self.messages.append(notice.clone());
        }
    }

    /// Fleet stationed at the coordinate, created if absent
    pub fn fleet_at_mut(&mut self, coordinate: Coordinate, new_name: &str) -> &mut Fleet {
        let index = match self.fleets.iter().position(|f| f.coordinate == coordinate) {
            Some(index) => index,
            None => {
                self.fleets.push(Fleet::new(new_name, coordinate));
                self.fleets.len() - 1
            }
        };
        &mut self.fleets[index]
    }

    pub fn has_mission(&self, kind: MissionKind, planet: &str) -> bool {
        self.missions
            .iter()
            .any(|m| m.kind == kind && m.planet == planet)
    }
}
