//! Realm collaborator - race, government, leaders, fleets and messages

pub mod fleet;
pub mod government;
pub mod leader;
pub mod message;
#[allow(clippy::module_inception)]
pub mod realm;
pub mod race;

pub use fleet::{Fleet, Mission, MissionKind, MissionPhase, Ship};
pub use government::Government;
pub use leader::{Leader, LeaderStats, Perk};
pub use message::{MessageLog, Notice, NoticeKind};
pub use race::{Race, RaceTrait};
pub use realm::Realm;
