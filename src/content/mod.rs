//! Content layer - building and unit blueprints

pub mod building;
pub mod category;
pub mod registry;
pub mod unit;

pub use building::{BuildingCategory, BuildingDef};
pub use category::{CategoryBonuses, ProductionCategory};
pub use registry::{ContentLoadError, ContentRegistry};
pub use unit::{Hull, UnitDef, UnitRole};
