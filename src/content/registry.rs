//! Content registry - building and unit blueprints keyed by stable id
//!
//! The registry is constructed once at startup (from defaults or a TOML file)
//! and handed to every economy call that needs a definition. Lookups of an
//! unknown id are configuration errors.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::content::building::{BuildingCategory, BuildingDef};
use crate::content::category::{CategoryBonuses, ProductionCategory};
use crate::content::unit::{Hull, UnitDef, UnitRole};
use crate::core::error::{EconomyError, Result};
use crate::core::types::{BuildingId, UnitId};

/// Registry of all building and unit definitions
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    buildings: AHashMap<BuildingId, BuildingDef>,
    /// Insertion order, for deterministic iteration
    building_order: Vec<BuildingId>,
    units: AHashMap<UnitId, UnitDef>,
    unit_order: Vec<UnitId>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard content set
    pub fn with_defaults() -> Self {
        use ProductionCategory::*;

        let mut registry = Self::new();

        let buildings = [
            BuildingDef::new("basic_farm", "Basic farm", BuildingCategory::Farm, 5, 20)
                .with_bonus(Food, 1),
            BuildingDef::new("advanced_farm", "Advanced farm", BuildingCategory::Farm, 15, 40)
                .with_bonus(Food, 2)
                .with_upkeep(1)
                .replacing("basic_farm"),
            BuildingDef::new("basic_mine", "Basic mine", BuildingCategory::Mine, 0, 20)
                .with_bonus(Metal, 1),
            BuildingDef::new("advanced_mine", "Advanced mine", BuildingCategory::Mine, 15, 40)
                .with_bonus(Metal, 2)
                .with_upkeep(1)
                .replacing("basic_mine"),
            BuildingDef::new("basic_factory", "Basic factory", BuildingCategory::Factory, 10, 20)
                .with_bonus(Production, 1),
            BuildingDef::new("advanced_factory", "Advanced factory", BuildingCategory::Factory, 20, 40)
                .with_bonus(Production, 2)
                .with_upkeep(1)
                .replacing("basic_factory"),
            BuildingDef::new("basic_lab", "Basic lab", BuildingCategory::Research, 5, 20)
                .with_bonus(Research, 1),
            BuildingDef::new("culture_center", "Culture center", BuildingCategory::Culture, 10, 30)
                .with_bonus(Culture, 1)
                .with_happiness(1)
                .with_upkeep(1),
            BuildingDef::new("tax_center", "Tax center", BuildingCategory::Credit, 10, 30)
                .with_bonus(Credits, 1)
                .single_instance(),
            BuildingDef::new("market_center", "Market center", BuildingCategory::Credit, 20, 50)
                .with_bonus(Credits, 2)
                .with_upkeep(1)
                .single_instance(),
            BuildingDef::new("recycle_center", "Recycle center", BuildingCategory::Recycle, 20, 30)
                .with_material(50)
                .with_upkeep(1)
                .single_instance(),
            BuildingDef::new("xeno_archive", "Xeno archive", BuildingCategory::Research, 15, 40)
                .with_bonus(Research, 1)
                .with_artifact_research(1)
                .with_upkeep(1)
                .single_instance(),
            BuildingDef::new("barracks", "Barracks", BuildingCategory::Military, 10, 20)
                .with_happiness(-1)
                .with_wildlife_power(20)
                .single_instance(),
            BuildingDef::new("wildlife_preserve", "Wildlife preserve", BuildingCategory::Wildlife, 5, 30)
                .with_bonus(Culture, 1)
                .with_happiness(1)
                .with_wildlife_power(10)
                .single_instance(),
        ];
        for building in buildings {
            registry.add_building(building);
        }

        let units = [
            UnitDef::new("scout", "Scout", Hull::Ship, UnitRole::Scout, 5, 10),
            UnitDef::new("colony_ship", "Colony ship", Hull::Ship, UnitRole::Colony, 15, 30),
            UnitDef::new("freighter", "Freighter", Hull::Ship, UnitRole::Freighter, 10, 25),
            UnitDef::new("corvette", "Corvette", Hull::Ship, UnitRole::Warship, 20, 20),
            UnitDef::new("troop_carrier", "Troop carrier", Hull::Ship, UnitRole::Trooper, 10, 20),
            UnitDef::new("orbital_platform", "Orbital platform", Hull::Orbital, UnitRole::Station, 20, 30)
                .with_bonus(Research, 1),
            UnitDef::new("space_station", "Space station", Hull::Orbital, UnitRole::Station, 40, 60)
                .with_bonus(Research, 1)
                .with_bonus(Culture, 1)
                .with_bonus(Credits, 1),
        ];
        for unit in units {
            registry.add_unit(unit);
        }

        registry
    }

    /// Add or overwrite a building definition
    pub fn add_building(&mut self, building: BuildingDef) {
        if !self.buildings.contains_key(&building.id) {
            self.building_order.push(building.id.clone());
        }
        self.buildings.insert(building.id.clone(), building);
    }

    /// Add or overwrite a unit definition
    pub fn add_unit(&mut self, unit: UnitDef) {
        if !self.units.contains_key(&unit.id) {
            self.unit_order.push(unit.id.clone());
        }
        self.units.insert(unit.id.clone(), unit);
    }

    /// Look up a building; an unknown id is a configuration error
    pub fn building(&self, id: &BuildingId) -> Result<&BuildingDef> {
        self.buildings
            .get(id)
            .ok_or_else(|| EconomyError::MissingBuilding(id.to_string()))
    }

    /// Look up a unit; an unknown id is a configuration error
    pub fn unit(&self, id: &UnitId) -> Result<&UnitDef> {
        self.units
            .get(id)
            .ok_or_else(|| EconomyError::MissingUnit(id.to_string()))
    }

    pub fn has_building(&self, id: &BuildingId) -> bool {
        self.buildings.contains_key(id)
    }

    pub fn has_unit(&self, id: &UnitId) -> bool {
        self.units.contains_key(id)
    }

    /// All buildings in registration order
    pub fn buildings(&self) -> impl Iterator<Item = &BuildingDef> {
        self.building_order.iter().filter_map(|id| self.buildings.get(id))
    }

    /// All units in registration order
    pub fn units(&self) -> impl Iterator<Item = &UnitDef> {
        self.unit_order.iter().filter_map(|id| self.units.get(id))
    }

    /// Check cross references between definitions
    pub fn validate(&self) -> std::result::Result<(), ContentLoadError> {
        for building in self.buildings() {
            if let Some(replaces) = &building.replaces {
                if !self.buildings.contains_key(replaces) {
                    return Err(ContentLoadError::UnknownReplacement {
                        building: building.id.to_string(),
                        replaces: replaces.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Load content from a TOML file
    pub fn load_from_toml(path: &Path) -> std::result::Result<Self, ContentLoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ContentLoadError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse content from TOML string
    pub fn parse_toml(content: &str) -> std::result::Result<Self, ContentLoadError> {
        let toml_data: TomlContent =
            toml::from_str(content).map_err(|e| ContentLoadError::ParseError(e.to_string()))?;

        let mut registry = Self::new();
        for building in toml_data.buildings {
            let building = building.into_building()?;
            if registry.has_building(&building.id) {
                return Err(ContentLoadError::DuplicateId(building.id.to_string()));
            }
            registry.add_building(building);
        }
        for unit in toml_data.units {
            let unit = unit.into_unit()?;
            if registry.has_unit(&unit.id) {
                return Err(ContentLoadError::DuplicateId(unit.id.to_string()));
            }
            registry.add_unit(unit);
        }
        registry.validate()?;
        Ok(registry)
    }
}

/// Error type for content loading
#[derive(Debug, Clone, PartialEq)]
pub enum ContentLoadError {
    IoError(String),
    ParseError(String),
    InvalidCategory(String),
    InvalidBuildingCategory(String),
    InvalidHull(String),
    InvalidRole(String),
    DuplicateId(String),
    UnknownReplacement { building: String, replaces: String },
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLoadError::IoError(e) => write!(f, "IO error: {}", e),
            ContentLoadError::ParseError(e) => write!(f, "Parse error: {}", e),
            ContentLoadError::InvalidCategory(e) => write!(f, "Invalid production category: {}", e),
            ContentLoadError::InvalidBuildingCategory(e) => {
                write!(f, "Invalid building category: {}", e)
            }
            ContentLoadError::InvalidHull(e) => write!(f, "Invalid hull: {}", e),
            ContentLoadError::InvalidRole(e) => write!(f, "Invalid unit role: {}", e),
            ContentLoadError::DuplicateId(e) => write!(f, "Duplicate content id: {}", e),
            ContentLoadError::UnknownReplacement { building, replaces } => write!(
                f,
                "Building {} replaces unknown building {}",
                building, replaces
            ),
        }
    }
}

impl std::error::Error for ContentLoadError {}

/// TOML representation of a content file
#[derive(Debug, Deserialize)]
struct TomlContent {
    #[serde(default)]
    buildings: Vec<TomlBuilding>,
    #[serde(default)]
    units: Vec<TomlUnit>,
}

/// TOML representation of a single building
#[derive(Debug, Deserialize)]
struct TomlBuilding {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    bonuses: BTreeMap<String, i32>,
    #[serde(default)]
    material: u32,
    #[serde(default)]
    artifact_research: i32,
    #[serde(default)]
    metal_cost: u32,
    #[serde(default)]
    production_cost: u32,
    #[serde(default)]
    upkeep: u32,
    #[serde(default)]
    happiness: i32,
    #[serde(default)]
    single_instance: bool,
    #[serde(default)]
    wildlife_power: u32,
    replaces: Option<String>,
}

/// TOML representation of a single unit
#[derive(Debug, Deserialize)]
struct TomlUnit {
    id: String,
    name: String,
    hull: String,
    role: String,
    #[serde(default)]
    metal_cost: u32,
    #[serde(default)]
    production_cost: u32,
    #[serde(default)]
    bonuses: BTreeMap<String, i32>,
}

fn parse_bonuses(raw: BTreeMap<String, i32>) -> std::result::Result<CategoryBonuses, ContentLoadError> {
    let mut bonuses = CategoryBonuses::default();
    for (category, amount) in raw {
        let category: ProductionCategory = category.parse()?;
        bonuses.set(category, amount);
    }
    Ok(bonuses)
}

impl TomlBuilding {
    fn into_building(self) -> std::result::Result<BuildingDef, ContentLoadError> {
        Ok(BuildingDef {
            id: BuildingId::new(self.id),
            name: self.name,
            category: self.category.parse()?,
            bonuses: parse_bonuses(self.bonuses)?,
            material: self.material,
            artifact_research: self.artifact_research,
            metal_cost: self.metal_cost,
            production_cost: self.production_cost,
            upkeep: self.upkeep,
            happiness: self.happiness,
            single_instance: self.single_instance,
            wildlife_power: self.wildlife_power,
            replaces: self.replaces.map(BuildingId::new),
        })
    }
}

impl TomlUnit {
    fn into_unit(self) -> std::result::Result<UnitDef, ContentLoadError> {
        Ok(UnitDef {
            id: UnitId::new(self.id),
            name: self.name,
            hull: self.hull.parse()?,
            role: self.role.parse()?,
            metal_cost: self.metal_cost,
            production_cost: self.production_cost,
            bonuses: parse_bonuses(self.bonuses)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_defaults() {
        let registry = ContentRegistry::with_defaults();
        assert!(registry.validate().is_ok());

        let farm = registry.building(&BuildingId::new("basic_farm")).unwrap();
        assert_eq!(farm.bonus(ProductionCategory::Food), 1);

        let advanced = registry.building(&BuildingId::new("advanced_farm")).unwrap();
        assert_eq!(advanced.replaces, Some(BuildingId::new("basic_farm")));

        let station = registry.unit(&UnitId::new("space_station")).unwrap();
        assert!(station.is_orbital());
    }

    #[test]
    fn test_missing_blueprint_is_configuration_error() {
        let registry = ContentRegistry::with_defaults();
        let err = registry.building(&BuildingId::new("death_star")).unwrap_err();
        assert!(matches!(err, EconomyError::MissingBuilding(ref id) if id == "death_star"));
        assert!(err.is_configuration());

        let err = registry.unit(&UnitId::new("death_star")).unwrap_err();
        assert!(matches!(err, EconomyError::MissingUnit(_)));
    }

    #[test]
    fn test_registry_iteration_order_is_stable() {
        let registry = ContentRegistry::with_defaults();
        let first: Vec<_> = registry.buildings().map(|b| b.id.clone()).collect();
        let second: Vec<_> = registry.buildings().map(|b| b.id.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], BuildingId::new("basic_farm"));
    }

    #[test]
    fn test_content_toml_parsing() {
        let toml_content = r#"
[[buildings]]
id = "hydroponics"
name = "Hydroponics"
category = "Farm"
metal_cost = 10
production_cost = 25
bonuses = { food = 2, happiness_is_not_here = 0 }
"#;
        // Unknown bonus keys are unrecognized categories
        let result = ContentRegistry::parse_toml(toml_content);
        assert_eq!(
            result.unwrap_err(),
            ContentLoadError::InvalidCategory("happiness_is_not_here".into())
        );

        let toml_content = r#"
[[buildings]]
id = "hydroponics"
name = "Hydroponics"
category = "Farm"
metal_cost = 10
production_cost = 25
upkeep = 1
bonuses = { food = 2 }

[[buildings]]
id = "mega_hydroponics"
name = "Mega hydroponics"
category = "farm"
production_cost = 60
replaces = "hydroponics"
bonuses = { FOOD = 4, credit = -1 }

[[units]]
id = "frigate"
name = "Frigate"
hull = "ship"
role = "warship"
metal_cost = 30
production_cost = 30
"#;
        let registry = ContentRegistry::parse_toml(toml_content).expect("Should parse");
        let hydro = registry.building(&BuildingId::new("hydroponics")).unwrap();
        assert_eq!(hydro.bonus(ProductionCategory::Food), 2);
        assert_eq!(hydro.upkeep, 1);

        let mega = registry.building(&BuildingId::new("mega_hydroponics")).unwrap();
        assert_eq!(mega.bonus(ProductionCategory::Food), 4);
        assert_eq!(mega.bonus(ProductionCategory::Credits), -1);
        assert_eq!(mega.metal_cost, 0);

        let frigate = registry.unit(&UnitId::new("frigate")).unwrap();
        assert_eq!(frigate.role, UnitRole::Warship);
    }

    #[test]
    fn test_content_toml_unknown_replacement() {
        let toml_content = r#"
[[buildings]]
id = "better_mine"
name = "Better mine"
category = "mine"
replaces = "ghost_mine"
"#;
        match ContentRegistry::parse_toml(toml_content) {
            Err(ContentLoadError::UnknownReplacement { replaces, .. }) => {
                assert_eq!(replaces, "ghost_mine")
            }
            other => panic!("Expected UnknownReplacement, got {:?}", other),
        }
    }

    #[test]
    fn test_content_toml_duplicate_id() {
        let toml_content = r#"
[[buildings]]
id = "lab"
name = "Lab"
category = "research"

[[buildings]]
id = "lab"
name = "Lab again"
category = "research"
"#;
        assert_eq!(
            ContentRegistry::parse_toml(toml_content).unwrap_err(),
            ContentLoadError::DuplicateId("lab".into())
        );
    }

    #[test]
    fn test_load_content_from_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/content.toml");
        let registry =
            ContentRegistry::load_from_toml(&path).expect("Should load data/content.toml");

        assert!(registry.has_building(&BuildingId::new("basic_farm")));
        assert!(registry.has_building(&BuildingId::new("recycle_center")));
        assert!(registry.has_unit(&UnitId::new("colony_ship")));
        assert!(registry.has_unit(&UnitId::new("space_station")));
    }
}
