//! Unit movement math
//!
//! Computes where a move order would take a unit before the engine clamps it
//! to the grid and checks for collisions. Terrain cost is not consulted.

use crate::battle::action::{Direction, MoveTarget};
use crate::battle::units::Unit;
use crate::core::types::Position;

/// One step of `speed` along the unit vector from `from` toward `target`
///
/// Each axis is truncated toward zero, so slow units heading diagonally may
/// not move at all.
pub fn step_toward(from: Position, target: Position, speed: i32) -> Position {
    let dx = f64::from(target.x) - f64::from(from.x);
    let dy = f64::from(target.y) - f64::from(from.y);
    let distance = (dx * dx + dy * dy).sqrt();

    if distance <= 0.0 {
        return from;
    }

    let speed = f64::from(speed);
    from.offset(
        ((dx / distance) * speed) as i32,
        ((dy / distance) * speed) as i32,
    )
}

/// Translate by `speed` along a direction
pub fn step_direction(from: Position, direction: Direction, team: &str, speed: i32) -> Position {
    let (sx, sy) = direction.unit_offset(team);
    from.offset(sx.saturating_mul(speed), sy.saturating_mul(speed))
}

/// Unclamped destination of a move order
///
/// A `Toward` target with a negative coordinate is treated as "no target" and
/// leaves the unit where it is.
pub fn candidate_position(unit: &Unit, destination: &MoveTarget) -> Position {
    match destination {
        MoveTarget::Toward(target) if target.is_non_negative() => {
            step_toward(unit.position, *target, unit.speed)
        }
        MoveTarget::Toward(_) => unit.position,
        MoveTarget::Step(direction) => {
            step_direction(unit.position, *direction, &unit.team, unit.speed)
        }
    }
}
