//! Battle engine: owns the state and advances it one tick at a time
//!
//! Each tick: termination check -> tick cap -> every living unit decides
//! and acts in list order -> cooldowns tick down.
//!
//! The order is part of the contract. Given the same provider decisions,
//! every tick replays identically.

use crate::battle::action::{Action, MoveTarget};
use crate::battle::ai::{DecisionProvider, DecisionRegistry};
use crate::battle::constants::{ATTACK_COOLDOWN_TICKS, TEAM_A, TEAM_B};
use crate::battle::movement::candidate_position;
use crate::battle::resolution::calculate_damage;
use crate::battle::state::{BattleOutcome, BattleState, BattleStatus};
use crate::battle::stats::BattleStats;
use crate::battle::terrain::{TerrainCell, TerrainGrid};
use crate::battle::units::Unit;
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Position, Tick};

/// Deterministic tick-based battle engine
#[derive(Debug)]
pub struct BattleEngine {
    config: EngineConfig,
    state: BattleState,
    /// Units exactly as added, restored by `reset`
    roster: Vec<Unit>,
    registry: DecisionRegistry,
}

impl BattleEngine {
    /// Engine with an empty state and plain terrain sized to the grid
    ///
    /// Dimensions are not validated here; use `with_config` at a host boundary.
    pub fn new(width: u32, height: u32, max_ticks: Tick) -> Self {
        let config = EngineConfig::new(width, height, max_ticks);
        Self {
            config,
            state: BattleState::new(width, height),
            roster: Vec::new(),
            registry: DecisionRegistry::new(),
        }
    }

    /// Validated construction
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.width, config.height, config.max_ticks))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === SETUP ===

    /// Replace the whole terrain grid; dimensions must match the engine grid
    pub fn set_terrain(&mut self, terrain: TerrainGrid) -> Result<()> {
        if terrain.width() != self.config.width || terrain.height() != self.config.height {
            return Err(SimError::TerrainSizeMismatch {
                expected_width: self.config.width,
                expected_height: self.config.height,
                width: terrain.width(),
                height: terrain.height(),
            });
        }
        self.state.terrain = terrain;
        Ok(())
    }

    /// Replace the terrain from `height` rows of `width` cells
    pub fn set_terrain_rows(&mut self, rows: Vec<Vec<TerrainCell>>) -> Result<()> {
        self.set_terrain(TerrainGrid::from_rows(rows)?)
    }

    /// Replace a single cell. Returns false when the position is off-grid.
    pub fn set_terrain_cell(&mut self, pos: Position, cell: TerrainCell) -> bool {
        self.state.terrain.set(pos, cell)
    }

    /// Append a unit. List order is processing order.
    pub fn add_unit(&mut self, unit: Unit) {
        if self.roster.iter().any(|u| u.id == unit.id) {
            tracing::warn!("Unit id '{}' added twice; lookups will find the first", unit.id);
        }
        self.roster.push(unit.clone());
        self.state.units.push(unit);
    }

    /// Append a unit, rejecting a duplicate id
    pub fn try_add_unit(&mut self, unit: Unit) -> Result<()> {
        if self.roster.iter().any(|u| u.id == unit.id) {
            return Err(SimError::DuplicateUnit(unit.id));
        }
        self.add_unit(unit);
        Ok(())
    }

    /// Register the decision provider for a team, replacing any previous one
    pub fn set_decision_provider(
        &mut self,
        team: impl Into<String>,
        provider: impl DecisionProvider + 'static,
    ) {
        self.registry.register(team, Box::new(provider));
    }

    /// Register a boxed provider (e.g. from `StrategyProfile::build`)
    pub fn set_boxed_provider(&mut self, team: impl Into<String>, provider: Box<dyn DecisionProvider>) {
        self.registry.register(team, provider);
    }

    /// Register a closure as a team's decision callback
    pub fn set_ai_callback<F>(&mut self, team: impl Into<String>, callback: F)
    where
        F: FnMut(&Unit, &BattleState) -> Action + 'static,
    {
        self.registry.register_fn(team, callback);
    }

    pub fn registry(&self) -> &DecisionRegistry {
        &self.registry
    }

    // === LIFECYCLE ===

    /// Start (or restart) the battle. Units and terrain are left as they are.
    pub fn initialize(&mut self) {
        self.state.status = BattleStatus::Initialized;
        self.state.tick = 0;
        self.state.winner = BattleOutcome::Undecided;
        self.state.logs.clear();
        self.state.damage_by_team.clear();

        self.state.log("Battle initialized");
        tracing::info!(
            "Battle initialized: {} units on {}x{} grid, max {} ticks",
            self.state.units.len(),
            self.config.width,
            self.config.height,
            self.config.max_ticks
        );
    }

    /// Advance one discrete step. No-op unless initialized or running.
    pub fn tick(&mut self) {
        if !self.state.status.accepts_ticks() {
            tracing::trace!("Tick ignored in status {}", self.state.status);
            return;
        }

        self.state.status = BattleStatus::Running;
        self.state.tick += 1;

        // Terminating ticks process no units
        if self.check_win_condition() {
            self.finish();
            return;
        }

        if self.state.tick >= self.config.max_ticks {
            self.state.winner = BattleOutcome::Draw;
            self.state.log("Battle ended in draw - max ticks reached");
            self.finish();
            return;
        }

        for idx in 0..self.state.units.len() {
            if self.state.units[idx].is_alive() {
                self.process_unit(idx);
            }
        }

        for unit in &mut self.state.units {
            unit.cooldown = unit.cooldown.saturating_sub(1);
        }

        tracing::trace!(
            "Tick {} done: {} vs {} alive",
            self.state.tick,
            self.state.team_alive_count(TEAM_A),
            self.state.team_alive_count(TEAM_B)
        );
    }

    /// Initialize, then tick until finished. Bounded by `max_ticks`.
    pub fn run(&mut self) {
        self.initialize();
        while !self.is_finished() {
            self.tick();
        }
    }

    /// Back to an idle battle: units restored as added, terrain and providers kept
    pub fn reset(&mut self) {
        let terrain = std::mem::replace(
            &mut self.state.terrain,
            TerrainGrid::new(0, 0),
        );
        self.state = BattleState::new(self.config.width, self.config.height);
        self.state.terrain = terrain;
        self.state.units = self.roster.clone();
        tracing::debug!("Battle reset with {} units", self.state.units.len());
    }

    // === ACCESSORS ===

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn status(&self) -> BattleStatus {
        self.state.status
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn current_tick(&self) -> Tick {
        self.state.tick
    }

    /// Winning team, `"draw"`, or empty while undecided
    pub fn winner(&self) -> &str {
        self.state.winner.label()
    }

    pub fn outcome(&self) -> &BattleOutcome {
        &self.state.winner
    }

    /// Unit by id, living or not
    pub fn find_unit(&self, id: &str) -> Option<&Unit> {
        self.state.find_unit(id)
    }

    /// Snapshot copy of the living units
    pub fn alive_units(&self) -> Vec<Unit> {
        self.state.alive_units().cloned().collect()
    }

    /// Snapshot copy of a team's units, living or not
    pub fn team_units(&self, team: &str) -> Vec<Unit> {
        self.state.team_units(team).cloned().collect()
    }

    pub fn team_alive_count(&self, team: &str) -> usize {
        self.state.team_alive_count(team)
    }

    pub fn battle_stats(&self) -> BattleStats {
        BattleStats::from_state(&self.state)
    }

    // === RESOLUTION ===

    fn process_unit(&mut self, idx: usize) {
        // Cooldown gates the decision itself, not just the attack
        if self.state.units[idx].cooldown > 0 {
            return;
        }

        let action = self.registry.decide(&self.state.units[idx], &self.state);
        tracing::trace!(
            "Tick {}: {} chose {}",
            self.state.tick,
            self.state.units[idx].id,
            action
        );
        self.execute_action(idx, action);
    }

    fn execute_action(&mut self, idx: usize, action: Action) {
        match action {
            Action::Move { destination } => self.handle_move(idx, &destination),
            Action::Attack { target } => self.handle_attack(idx, target.as_deref()),
            Action::Idle => {}
        }
    }

    fn handle_move(&mut self, idx: usize, destination: &MoveTarget) {
        let unit = &self.state.units[idx];
        let candidate = self
            .state
            .terrain
            .clamp(candidate_position(unit, destination));

        if self.state.is_occupied(candidate, &unit.id) {
            tracing::debug!(
                "Tick {}: {} blocked moving to {}",
                self.state.tick,
                unit.id,
                candidate
            );
            return;
        }

        self.state.units[idx].position = candidate;
    }

    fn handle_attack(&mut self, idx: usize, target: Option<&str>) {
        let attacker = &self.state.units[idx];
        if attacker.cooldown > 0 {
            return;
        }

        // An explicit id must name a living unit; it does not fall back to nearest
        let target_idx = match target {
            Some(id) => self.state.find_living_index(id),
            None => self.state.closest_enemy_index(attacker),
        };
        let Some(target_idx) = target_idx else {
            tracing::trace!("Tick {}: {} found no target", self.state.tick, attacker.id);
            return;
        };

        let defender = &self.state.units[target_idx];
        if !attacker.in_range_of(defender) {
            return;
        }

        let damage = calculate_damage(attacker.attack, defender.defense);
        let attacker_team = attacker.team.clone();
        let attacker_id = attacker.id.clone();
        let defender_team = defender.team.clone();
        let defender_id = defender.id.clone();

        let defender = &mut self.state.units[target_idx];
        let health_before = defender.health;
        defender.take_damage(damage);
        let applied = health_before - defender.health;
        let eliminated = !defender.is_alive();

        let attacker = &mut self.state.units[idx];
        attacker.cooldown = ATTACK_COOLDOWN_TICKS;
        attacker.target_id = Some(defender_id.clone());

        self.state.record_damage(&attacker_team, applied);
        self.state.log(&format!(
            "{} unit {} attacked {} unit {} for {} damage",
            attacker_team, attacker_id, defender_team, defender_id, damage
        ));
        if eliminated {
            self.state
                .log(&format!("{} unit {} eliminated!", defender_team, defender_id));
        }
    }

    /// Decide the battle if a side is wiped out. Only teamA and teamB count.
    fn check_win_condition(&mut self) -> bool {
        let team_a_alive = self.state.team_alive_count(TEAM_A);
        let team_b_alive = self.state.team_alive_count(TEAM_B);

        let (outcome, message) = match (team_a_alive, team_b_alive) {
            (0, 0) => (
                BattleOutcome::Draw,
                "Battle ended in draw - all units eliminated".to_string(),
            ),
            (0, _) => (
                BattleOutcome::Victory(TEAM_B.to_string()),
                format!("{} wins!", TEAM_B),
            ),
            (_, 0) => (
                BattleOutcome::Victory(TEAM_A.to_string()),
                format!("{} wins!", TEAM_A),
            ),
            _ => return false,
        };

        self.state.winner = outcome;
        self.state.log(&message);
        true
    }

    fn finish(&mut self) {
        self.state.status = BattleStatus::Finished;
        tracing::info!(
            "Battle finished at tick {}: winner '{}'",
            self.state.tick,
            self.state.winner
        );
    }
}
