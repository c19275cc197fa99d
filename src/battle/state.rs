//! Battle state snapshot
//!
//! The engine owns the only mutable `BattleState`. Decision providers see it
//! by shared reference mid-tick, so moves and damage applied to units earlier
//! in the list are already visible to units processed later in the same tick.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::battle::constants::DRAW_LABEL;
use crate::battle::log::BattleLog;
use crate::battle::terrain::TerrainGrid;
use crate::battle::units::Unit;
use crate::core::types::{Position, Tick};

/// Lifecycle status. Only moves forward, except through `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStatus {
    #[default]
    Idle,
    Initialized,
    Running,
    Finished,
}

impl BattleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BattleStatus::Idle => "idle",
            BattleStatus::Initialized => "initialized",
            BattleStatus::Running => "running",
            BattleStatus::Finished => "finished",
        }
    }

    /// Will `tick` do anything in this status?
    pub fn accepts_ticks(&self) -> bool {
        matches!(self, BattleStatus::Initialized | BattleStatus::Running)
    }
}

impl fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Battle outcome
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "team", rename_all = "lowercase")]
pub enum BattleOutcome {
    #[default]
    Undecided,
    Victory(String),
    Draw,
}

impl BattleOutcome {
    /// Winning team label, `"draw"`, or empty while undecided
    pub fn label(&self) -> &str {
        match self {
            BattleOutcome::Undecided => "",
            BattleOutcome::Victory(team) => team,
            BattleOutcome::Draw => DRAW_LABEL,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, BattleOutcome::Undecided)
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete battle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub tick: Tick,
    /// Insertion order is processing order
    pub units: Vec<Unit>,
    pub terrain: TerrainGrid,
    pub status: BattleStatus,
    pub winner: BattleOutcome,
    pub logs: BattleLog,
    /// Damage applied, keyed by the attacking team
    pub damage_by_team: BTreeMap<String, u64>,
}

impl BattleState {
    /// Empty state with terrain pre-sized to the grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            tick: 0,
            units: Vec::new(),
            terrain: TerrainGrid::new(width, height),
            status: BattleStatus::Idle,
            winner: BattleOutcome::Undecided,
            logs: BattleLog::new(),
            damage_by_team: BTreeMap::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == BattleStatus::Finished
    }

    /// Append `"[Tick n] message"` to the log trail
    pub fn log(&mut self, message: &str) {
        self.logs.push(self.tick, message);
    }

    // === UNIT QUERIES ===

    /// Look up a unit by id, living or not
    pub fn find_unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Index of the living unit with this id
    pub(crate) fn find_living_index(&self, id: &str) -> Option<usize> {
        self.units.iter().position(|u| u.id == id && u.is_alive())
    }

    pub fn alive_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    /// All units on a team, living or not
    pub fn team_units<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a Unit> {
        self.units.iter().filter(move |u| u.team == team)
    }

    pub fn team_alive_count(&self, team: &str) -> usize {
        self.units
            .iter()
            .filter(|u| u.team == team && u.is_alive())
            .count()
    }

    /// Nearest living enemy by Euclidean distance; ties go to the earlier unit in the list
    pub fn closest_enemy(&self, unit: &Unit) -> Option<&Unit> {
        self.closest_enemy_index(unit).map(|idx| &self.units[idx])
    }

    pub(crate) fn closest_enemy_index(&self, unit: &Unit) -> Option<usize> {
        let mut closest = None;
        let mut min_distance = f64::MAX;

        for (idx, enemy) in self.units.iter().enumerate() {
            if enemy.is_alive() && enemy.is_enemy_of(unit) {
                let distance = unit.distance_to(enemy);
                if distance < min_distance {
                    min_distance = distance;
                    closest = Some(idx);
                }
            }
        }

        closest
    }

    /// Living enemies within `range` of the unit, in list order
    pub fn enemies_in_range(&self, unit: &Unit, range: i32) -> Vec<&Unit> {
        self.units
            .iter()
            .filter(|e| e.is_alive() && e.is_enemy_of(unit))
            .filter(|e| unit.distance_to(e) <= f64::from(range))
            .collect()
    }

    /// Living teammates within `range` of the unit, excluding the unit itself
    pub fn allies_in_range(&self, unit: &Unit, range: i32) -> Vec<&Unit> {
        self.units
            .iter()
            .filter(|a| a.is_alive() && a.team == unit.team && a.id != unit.id)
            .filter(|a| unit.distance_to(a) <= f64::from(range))
            .collect()
    }

    /// Does a living unit other than `exclude_id` stand on `pos`?
    pub fn is_occupied(&self, pos: Position, exclude_id: &str) -> bool {
        self.units
            .iter()
            .any(|u| u.is_alive() && u.id != exclude_id && u.position == pos)
    }

    // === DAMAGE ===

    pub fn total_damage_dealt(&self) -> u64 {
        self.damage_by_team.values().sum()
    }

    pub(crate) fn record_damage(&mut self, team: &str, amount: i32) {
        let amount = u64::try_from(amount).unwrap_or(0);
        *self.damage_by_team.entry(team.to_string()).or_insert(0) += amount;
    }
}
