//! Per-tick unit decisions
//!
//! An `Action` is what a decision provider hands back for one unit on one
//! tick. It never mutates anything itself; the engine interprets it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::battle::constants::TEAM_A;
use crate::core::types::Position;

/// Symbolic movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,    // -y
    Down,  // +y
    Left,  // -x
    Right, // +x
    /// Team-relative: +x for teamA, -x for everyone else
    Forward,
}

impl Direction {
    /// Parse a direction label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "forward" => Some(Direction::Forward),
            _ => None,
        }
    }

    /// Unit step `(dx, dy)` for a unit on the given team
    pub fn unit_offset(&self, team: &str) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Forward if team == TEAM_A => (1, 0),
            Direction::Forward => (-1, 0),
        }
    }
}

/// Where a move goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveTarget {
    /// Head toward an absolute position. Negative coordinates mean "no target".
    Toward(Position),
    /// Step along a direction
    Step(Direction),
}

/// A unit's intended behavior for the current tick
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    #[default]
    Idle,
    Move {
        destination: MoveTarget,
    },
    /// `target: None` lets the engine pick the nearest living enemy
    Attack {
        #[serde(default)]
        target: Option<String>,
    },
}

impl Action {
    pub fn idle() -> Self {
        Action::Idle
    }

    pub fn move_toward(position: Position) -> Self {
        Action::Move {
            destination: MoveTarget::Toward(position),
        }
    }

    pub fn step(direction: Direction) -> Self {
        Action::Move {
            destination: MoveTarget::Step(direction),
        }
    }

    /// Step along a direction given by label; unknown labels degrade to idle
    pub fn step_named(label: &str) -> Self {
        match Direction::parse(label) {
            Some(direction) => Action::step(direction),
            None => {
                tracing::trace!("Unknown direction '{}', idling", label);
                Action::Idle
            }
        }
    }

    pub fn attack_nearest() -> Self {
        Action::Attack { target: None }
    }

    pub fn attack(target: impl Into<String>) -> Self {
        Action::Attack {
            target: Some(target.into()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Idle => f.write_str("idle"),
            Action::Move {
                destination: MoveTarget::Toward(pos),
            } => write!(f, "move toward {}", pos),
            Action::Move {
                destination: MoveTarget::Step(dir),
            } => write!(f, "move {:?}", dir),
            Action::Attack { target: Some(id) } => write!(f, "attack {}", id),
            Action::Attack { target: None } => f.write_str("attack nearest"),
        }
    }
}
