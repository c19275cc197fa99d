//! Battle rule constants - all tunable values in one place

use crate::core::types::Tick;

// Grid
pub const DEFAULT_GRID_WIDTH: u32 = 20;
pub const DEFAULT_GRID_HEIGHT: u32 = 20;

// Time
pub const DEFAULT_MAX_TICKS: Tick = 1000;

/// Ticks an attacker waits after a landed attack before it is asked for a decision again
pub const ATTACK_COOLDOWN_TICKS: u32 = 3;

// Damage: final = max(MIN_DAMAGE, attack - floor(defense * DEFENSE_MITIGATION))
pub const DEFENSE_MITIGATION: f64 = 0.5;
pub const MIN_DAMAGE: i32 = 1;

// Log trail
pub const LOG_CAPACITY: usize = 100;

// Teams. Win-condition logic assumes exactly these two sides.
pub const TEAM_A: &str = "teamA";
pub const TEAM_B: &str = "teamB";

/// Label stored as the winner when nobody wins
pub const DRAW_LABEL: &str = "draw";

// Default unit record
pub const DEFAULT_UNIT_HEALTH: i32 = 100;
pub const DEFAULT_UNIT_ATTACK: i32 = 10;
pub const DEFAULT_UNIT_DEFENSE: i32 = 5;
pub const DEFAULT_UNIT_SPEED: i32 = 1;
pub const DEFAULT_UNIT_RANGE: i32 = 1;
