//! Built-in decision providers
//!
//! Simple, deterministic team behaviors for scenarios, the runner and tests.

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::battle::action::{Action, Direction};
use crate::battle::ai::DecisionProvider;
use crate::battle::movement::step_toward;
use crate::battle::state::BattleState;
use crate::battle::units::Unit;
use crate::core::types::Position;

/// Move order that closes on `target`
///
/// Falls back to a straight step along the dominant axis when the direct
/// vector would truncate to no movement (slow units heading diagonally).
pub fn approach(unit: &Unit, target: Position) -> Action {
    if step_toward(unit.position, target, unit.speed) != unit.position {
        return Action::move_toward(target);
    }

    let dx = target.x - unit.position.x;
    let dy = target.y - unit.position.y;
    let direction = if dx.abs() >= dy.abs() {
        if dx >= 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy >= 0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Action::step(direction)
}

/// Never acts
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPosition;

impl DecisionProvider for HoldPosition {
    fn decide(&mut self, _unit: &Unit, _state: &BattleState) -> Action {
        Action::Idle
    }

    fn name(&self) -> &str {
        "idle"
    }
}

/// Always attacks, letting the engine pick the nearest enemy
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackNearest;

impl DecisionProvider for AttackNearest {
    fn decide(&mut self, _unit: &Unit, _state: &BattleState) -> Action {
        Action::attack_nearest()
    }

    fn name(&self) -> &str {
        "attack"
    }
}

/// Attack the nearest enemy when in range, otherwise close in on it
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggressive;

impl DecisionProvider for Aggressive {
    fn decide(&mut self, unit: &Unit, state: &BattleState) -> Action {
        match state.closest_enemy(unit) {
            None => Action::Idle,
            Some(enemy) if unit.in_range_of(enemy) => Action::attack(enemy.id.clone()),
            Some(enemy) => approach(unit, enemy.position),
        }
    }

    fn name(&self) -> &str {
        "aggressive"
    }
}

/// Hold ground; only engage enemies that come within `engage_radius`
#[derive(Debug, Clone, Copy)]
pub struct Defensive {
    pub engage_radius: i32,
}

impl Defensive {
    pub const DEFAULT_ENGAGE_RADIUS: i32 = 5;

    pub fn new(engage_radius: i32) -> Self {
        Self { engage_radius }
    }
}

impl Default for Defensive {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENGAGE_RADIUS)
    }
}

impl DecisionProvider for Defensive {
    fn decide(&mut self, unit: &Unit, state: &BattleState) -> Action {
        let Some(enemy) = state.closest_enemy(unit) else {
            return Action::Idle;
        };

        if unit.in_range_of(enemy) {
            Action::attack(enemy.id.clone())
        } else if unit.distance_to(enemy) <= f64::from(self.engage_radius) {
            approach(unit, enemy.position)
        } else {
            Action::Idle
        }
    }

    fn name(&self) -> &str {
        "defensive"
    }
}

/// March forward until an enemy is in range, then attack it
#[derive(Debug, Clone, Copy, Default)]
pub struct Advance;

impl DecisionProvider for Advance {
    fn decide(&mut self, unit: &Unit, state: &BattleState) -> Action {
        match state.enemies_in_range(unit, unit.range).first() {
            Some(enemy) => Action::attack(enemy.id.clone()),
            None => Action::step(Direction::Forward),
        }
    }

    fn name(&self) -> &str {
        "advance"
    }
}

/// Random walk from a seeded RNG; attacks whatever enemy is in range
#[derive(Debug, Clone)]
pub struct Wanderer {
    rng: ChaCha8Rng,
}

impl Wanderer {
    const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionProvider for Wanderer {
    fn decide(&mut self, unit: &Unit, state: &BattleState) -> Action {
        if let Some(enemy) = state.enemies_in_range(unit, unit.range).first() {
            return Action::attack(enemy.id.clone());
        }

        // One extra slot for standing still
        let roll = self.rng.gen_range(0..=Self::MOVES.len());
        match Self::MOVES.get(roll) {
            Some(direction) => Action::step(*direction),
            None => Action::Idle,
        }
    }

    fn name(&self) -> &str {
        "wander"
    }
}
