//! Aggregate battle statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::battle::constants::{TEAM_A, TEAM_B};
use crate::battle::state::BattleState;
use crate::core::types::Tick;

/// Summary of a battle, finished or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleStats {
    pub total_ticks: Tick,
    /// Winning team, `"draw"`, or empty while undecided
    pub winner: String,
    pub team_a_units_remaining: usize,
    pub team_b_units_remaining: usize,
    pub total_damage_dealt: u64,
    pub damage_by_team: BTreeMap<String, u64>,
    pub logs: Vec<String>,
}

impl BattleStats {
    pub fn from_state(state: &BattleState) -> Self {
        Self {
            total_ticks: state.tick,
            winner: state.winner.label().to_string(),
            team_a_units_remaining: state.team_alive_count(TEAM_A),
            team_b_units_remaining: state.team_alive_count(TEAM_B),
            total_damage_dealt: state.total_damage_dealt(),
            damage_by_team: state.damage_by_team.clone(),
            logs: state.logs.to_vec(),
        }
    }
}
