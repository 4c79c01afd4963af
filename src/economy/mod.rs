//! Per-turn planetary economy
//!
//! Production ledger, happiness engine, population state machine,
//! construction ledger with rushing, and the destruction model, tied
//! together by `advance_one_turn`.

pub mod construction;
pub mod destruction;
pub mod happiness;
pub mod population;
pub mod production;
pub mod rush;
pub mod turn;

pub use construction::{
    can_build, check_construction, project_cost, ConstructionOutcome, ConstructionRejection,
    FirstAvailableSelector, Project, ProjectCost, ProjectSelector, VirtualProject,
};
pub use destruction::{
    apply_strike, destroy_one_building, fight_against_attacker, kill_one_worker, remove_building,
    AttackOutcome, NukingRecord, StrikeKind,
};
pub use happiness::{calculate_happiness, roll_effect, HappinessBonus, HappinessEffect};
pub use population::{growth_threshold, update_population, PopulationState};
pub use production::{
    artifact_research, population_delta, production_breakdown, total_production, yields,
    ProductionBreakdown, Yields,
};
pub use rush::{rush_quote, rush_with_credits, rush_with_population, RushOutcome, RushQuote, RushRejection};
pub use turn::{advance_one_turn, TurnContext, TurnReport};
