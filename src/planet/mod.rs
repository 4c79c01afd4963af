//! Planet aggregate - physical traits, workforce, buildings and stockpiles

pub mod environment;
pub mod event;
#[allow(clippy::module_inception)]
pub mod planet;
pub mod record;
pub mod status;
pub mod workforce;

pub use environment::{Environment, Gravity, Temperature, WaterLevel};
pub use event::PlanetaryEvent;
pub use planet::{InstallRejection, Installed, Planet};
pub use record::PlanetRecord;
pub use status::AppliedStatus;
pub use workforce::{WorkerRole, Workforce};
