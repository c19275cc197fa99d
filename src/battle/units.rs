//! Combat units
//!
//! A unit is a passive record: the engine is the only thing that mutates it
//! during a battle. Liveness needs both the explicit flag and positive
//! health, so a unit can be removed from play without touching its health.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    DEFAULT_UNIT_ATTACK, DEFAULT_UNIT_DEFENSE, DEFAULT_UNIT_HEALTH, DEFAULT_UNIT_RANGE,
    DEFAULT_UNIT_SPEED,
};
use crate::battle::unit_type::{UnitStats, UnitType};
use crate::core::types::Position;

/// A single unit on the battle grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unique within a battle
    pub id: String,
    pub team: String,
    /// Free-form label, no behavioral effect
    #[serde(rename = "type")]
    pub unit_type: String,
    pub position: Position,

    // Combat stats
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub range: i32,

    // Transient
    pub alive: bool,
    /// Ticks remaining before the unit is asked for a decision again
    pub cooldown: u32,
    /// Last unit this one landed an attack on
    #[serde(default)]
    pub target_id: Option<String>,
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            id: String::new(),
            team: String::new(),
            unit_type: String::new(),
            position: Position::default(),
            health: DEFAULT_UNIT_HEALTH,
            max_health: DEFAULT_UNIT_HEALTH,
            attack: DEFAULT_UNIT_ATTACK,
            defense: DEFAULT_UNIT_DEFENSE,
            speed: DEFAULT_UNIT_SPEED,
            range: DEFAULT_UNIT_RANGE,
            alive: true,
            cooldown: 0,
            target_id: None,
        }
    }
}

impl Unit {
    /// Unit with the default stat block at (0, 0)
    pub fn new(id: impl Into<String>, team: impl Into<String>, unit_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            team: team.into(),
            unit_type: unit_type.into(),
            ..Default::default()
        }
    }

    /// Unit seeded from a preset's stats and label
    pub fn from_preset(id: impl Into<String>, team: impl Into<String>, preset: UnitType) -> Self {
        Self::new(id, team, preset.label()).with_stats(preset.default_stats())
    }

    /// Place the unit
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Replace the stat block; health starts full
    pub fn with_stats(mut self, stats: UnitStats) -> Self {
        self.health = stats.health;
        self.max_health = stats.health;
        self.attack = stats.attack;
        self.defense = stats.defense;
        self.speed = stats.speed;
        self.range = stats.range;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive && self.health > 0
    }

    /// Remove health, never dropping below zero. Negative amounts are ignored.
    pub fn take_damage(&mut self, damage: i32) {
        self.health = self.health.saturating_sub(damage.max(0)).max(0);
    }

    /// Restore health, never exceeding `max_health`. Negative amounts are ignored.
    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
    }

    pub fn is_enemy_of(&self, other: &Unit) -> bool {
        self.team != other.team
    }

    /// Euclidean distance between two units
    pub fn distance_to(&self, other: &Unit) -> f64 {
        self.position.distance_to(&other.position)
    }

    /// Is the other unit within this unit's attack range?
    pub fn in_range_of(&self, other: &Unit) -> bool {
        self.distance_to(other) <= f64::from(self.range)
    }
}
