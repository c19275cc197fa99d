//! Battle system - deterministic tick-based skirmishes on a square grid
//!
//! Two teams (`teamA`, `teamB`) of units move and attack until one side is
//! wiped out or the tick cap is reached.
//!
//! Key properties:
//! - Units act one at a time, in list order, each tick
//! - Decisions come from pluggable per-team providers
//! - Same inputs and same decisions replay identically

pub mod action;
pub mod ai;
pub mod constants;
pub mod engine;
pub mod log;
pub mod movement;
pub mod resolution;
pub mod scenario;
pub mod state;
pub mod stats;
pub mod terrain;
pub mod unit_type;
pub mod units;

// Re-exports for convenient access
pub use action::{Action, Direction, MoveTarget};
pub use ai::{DecisionProvider, DecisionRegistry, StrategyProfile};
pub use constants::*;
pub use engine::BattleEngine;
pub use log::BattleLog;
pub use movement::{candidate_position, step_direction, step_toward};
pub use resolution::calculate_damage;
pub use scenario::{Scenario, TerrainSpec, UnitSpec};
pub use state::{BattleOutcome, BattleState, BattleStatus};
pub use stats::BattleStats;
pub use terrain::{TerrainCell, TerrainGrid, TerrainKind};
pub use unit_type::{UnitStats, UnitType};
pub use units::Unit;
