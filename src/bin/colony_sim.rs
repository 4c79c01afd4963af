//! Colony Sim
//! Runs a single colony through a number of turns and prints what happened

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use colony_economy::content::{ContentRegistry, ProductionCategory};
use colony_economy::core::error::Result;
use colony_economy::core::types::{BuildingId, Coordinate};
use colony_economy::core::{config, set_config, EconomyConfig};
use colony_economy::economy::{
    advance_one_turn, production_breakdown, FirstAvailableSelector, Project, TurnContext,
};
use colony_economy::planet::{Environment, Planet, PlanetaryEvent, WaterLevel};
use colony_economy::realm::{Government, Leader, Perk, Race, Realm};

/// Colony Sim - advance one colony turn by turn
#[derive(Parser, Debug)]
#[command(name = "colony_sim")]
#[command(about = "Simulate the economy of a single colony")]
struct Args {
    /// Number of turns to simulate
    #[arg(long, default_value_t = 50)]
    turns: u32,

    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Content TOML file (buildings and units)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Economy config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final planet record as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("colony_economy=info")),
        )
        .init();

    let args = Args::parse();

    let content = match &args.content {
        Some(path) => ContentRegistry::load_from_toml(path)?,
        None => ContentRegistry::with_defaults(),
    };
    if let Some(path) = &args.config {
        let loaded = EconomyConfig::load_from_toml(path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("Economy config already set, keeping the existing one");
        }
    }
    let config = config();

    let mut realm = Realm::new(0, "Terran League", Race::new(1, "Terran"), Government::democracy());
    let governor = realm.add_leader(Leader::new(1, "Ilsa Varn").with_perk(Perk::Industrious));
    realm.treasury = 20;

    let mut planet = Planet::new(
        "New Haven",
        Coordinate::new(4, 7),
        Environment::new(12).with_water(WaterLevel::Ocean),
    )
    .with_metal_in_ground(400)
    .with_event(PlanetaryEvent::LushVegetation);

    let mut events = Vec::new();
    planet.colonize(&mut realm, 2, &mut events);
    realm.log_all(&events);
    planet.home_world = Some(realm.race.id);
    planet.assign_governor(governor);
    planet.set_construction(Some(Project::Building(BuildingId::new("basic_farm"))));

    let mut selector = FirstAvailableSelector;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("=== COLONY SIM ===");
    println!("Planet {} at {}, {} turns, seed {}", planet.name, planet.coordinate, args.turns, args.seed);
    println!();

    for turn in 1..=args.turns {
        let mut ctx = TurnContext {
            realm: &mut realm,
            content: &content,
            config,
            selector: &mut selector,
            rng: &mut rng,
            enemy_fleet_present: false,
        };
        let report = advance_one_turn(&mut planet, &mut ctx)?;

        println!(
            "Turn {:>3}: pop {:>2}  metal {:>3}  prod {:>3}  culture {:>3}  credits {:>4}  h {:+}",
            turn,
            planet.population(),
            planet.metal(),
            planet.production(),
            planet.culture(),
            realm.treasury,
            report.happiness
        );
        for notice in &report.notices {
            println!("          {}", notice);
        }

        if !planet.is_colonized() {
            println!("Colony lost on turn {}", turn);
            break;
        }
    }

    println!();
    println!("=== FINAL STATE ===");
    println!("Buildings: {}", planet.building_count());
    for category in ProductionCategory::ALL {
        print!("{}", production_breakdown(&planet, &realm, &content, config, category)?);
    }
    println!("Messages logged: {}", realm.messages.len());

    if args.json {
        println!("{}", planet.to_record().to_json()?);
    }

    Ok(())
}
