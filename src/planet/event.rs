//! Planetary events - one-off discoveries activated on colonization

use serde::{Deserialize, Serialize};

use crate::content::ProductionCategory;
use crate::planet::status::AppliedStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetaryEvent {
    #[default]
    None,
    LushVegetation,
    MetalRichSurface,
    AncientArtifact,
    Paradise,
    HostileFauna,
}

/// What activating an event does to the planet and its owner
#[derive(Debug, Clone, PartialEq)]
pub struct EventActivation {
    pub status: Option<AppliedStatus>,
    /// Adds an undeciphered artifact to the owning realm
    pub artifact: bool,
    pub text: String,
}

impl PlanetaryEvent {
    pub fn code(self) -> u8 {
        match self {
            PlanetaryEvent::None => 0,
            PlanetaryEvent::LushVegetation => 1,
            PlanetaryEvent::MetalRichSurface => 2,
            PlanetaryEvent::AncientArtifact => 3,
            PlanetaryEvent::Paradise => 4,
            PlanetaryEvent::HostileFauna => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PlanetaryEvent::None),
            1 => Some(PlanetaryEvent::LushVegetation),
            2 => Some(PlanetaryEvent::MetalRichSurface),
            3 => Some(PlanetaryEvent::AncientArtifact),
            4 => Some(PlanetaryEvent::Paradise),
            5 => Some(PlanetaryEvent::HostileFauna),
            _ => None,
        }
    }

    /// Effect of activating the event; None for the empty event
    pub fn activation(self) -> Option<EventActivation> {
        let (status, artifact, text) = match self {
            PlanetaryEvent::None => return None,
            PlanetaryEvent::LushVegetation => (
                Some(
                    AppliedStatus::permanent("lush_vegetation", "Lush vegetation")
                        .with_bonus(ProductionCategory::Food, 1),
                ),
                false,
                "Colonists found lush vegetation",
            ),
            PlanetaryEvent::MetalRichSurface => (
                Some(
                    AppliedStatus::permanent("metal_rich_surface", "Metal rich surface")
                        .with_bonus(ProductionCategory::Metal, 1),
                ),
                false,
                "The surface is rich in easily mined metal",
            ),
            PlanetaryEvent::AncientArtifact => (
                None,
                true,
                "Colonists unearthed an ancient artifact",
            ),
            PlanetaryEvent::Paradise => (
                Some(AppliedStatus::permanent("paradise", "Paradise").with_happiness(1)),
                false,
                "The colony thrives on a paradise world",
            ),
            PlanetaryEvent::HostileFauna => (
                Some(
                    AppliedStatus::timed("hostile_fauna", "Hostile fauna", 10)
                        .with_happiness(-1)
                        .with_bonus(ProductionCategory::Food, -1),
                ),
                false,
                "Hostile fauna harasses the colonists",
            ),
        };
        Some(EventActivation {
            status,
            artifact,
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_codes() {
        for code in 0..=5u8 {
            assert_eq!(PlanetaryEvent::from_code(code).unwrap().code(), code);
        }
        assert_eq!(PlanetaryEvent::from_code(200), None);
    }

    #[test]
    fn test_activation() {
        assert!(PlanetaryEvent::None.activation().is_none());

        let lush = PlanetaryEvent::LushVegetation.activation().unwrap();
        let status = lush.status.unwrap();
        assert_eq!(status.bonuses.get(ProductionCategory::Food), 1);
        assert!(!lush.artifact);

        let artifact = PlanetaryEvent::AncientArtifact.activation().unwrap();
        assert!(artifact.artifact);
        assert!(artifact.status.is_none());
    }
}
