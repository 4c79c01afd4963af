//! In-game notices and the realm message log

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeKind {
    // Population
    Growth,
    Starvation,
    Overpopulation,
    ColonyAbandoned,
    PopulationLost,

    // Happiness
    HappinessEffect,

    // Construction
    BuildingCompleted,
    UnitCompleted,
    OrbitalChanged,
    ProjectCompleted,
    ConstructionRejected,
    Rushed,

    // Destruction
    BuildingLost,
    Bombardment,
    GroundCombat,

    // Misc
    StatusExpired,
    EventActivated,
    ConfigurationError,
}

/// A descriptive, user-visible message about one planet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub planet: String,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, planet: &str, text: impl Into<String>) -> Self {
        Self {
            kind,
            planet: planet.to_string(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.planet, self.text)
    }
}

/// A logged notice with its sequence number
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u32,
    pub notice: Notice,
}

/// The realm's message log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MessageLog {
    pub messages: Vec<Message>,
    next_message_id: u32,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, notice: Notice) -> u32 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(Message { id, notice });
        id
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn for_planet<'a>(&'a self, planet: &'a str) -> impl Iterator<Item = &'a Message> {
        self.messages.iter().filter(move |m| m.notice.planet == planet)
    }

    pub fn of_kind(&self, kind: NoticeKind) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.notice.kind == kind)
    }
}
