//! Scenario files
//!
//! A scenario is a TOML document describing the grid, one strategy per team,
//! the starting units and optional terrain overrides:
//!
//! ```toml
//! [grid]
//! width = 20
//! height = 20
//! max_ticks = 500
//!
//! [teams]
//! teamA = { strategy = "aggressive" }
//! teamB = { strategy = "defensive", engage_radius = 6 }
//!
//! [[units]]
//! id = "a1"
//! team = "teamA"
//! preset = "soldier"
//! x = 2
//! y = 10
//!
//! [[terrain]]
//! x = 10
//! y = 10
//! kind = "forest"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::battle::ai::StrategyProfile;
use crate::battle::engine::BattleEngine;
use crate::battle::terrain::TerrainCell;
use crate::battle::unit_type::UnitType;
use crate::battle::units::Unit;
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Position, Tick};

/// Type label for units declared without a preset
const GENERIC_UNIT_TYPE: &str = "unit";

/// One starting unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub id: String,
    pub team: String,
    /// Preset label; engine defaults apply when absent
    #[serde(default)]
    pub preset: Option<String>,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub attack: Option<i32>,
    #[serde(default)]
    pub defense: Option<i32>,
    #[serde(default)]
    pub speed: Option<i32>,
    #[serde(default)]
    pub range: Option<i32>,
}

impl UnitSpec {
    /// Build the unit: preset (or defaults), then position, then overrides
    pub fn to_unit(&self) -> Result<Unit> {
        let unit = match &self.preset {
            Some(label) => {
                let preset: UnitType = label.parse()?;
                Unit::from_preset(self.id.clone(), self.team.clone(), preset)
            }
            None => Unit::new(self.id.clone(), self.team.clone(), GENERIC_UNIT_TYPE),
        };
        let mut unit = unit.at(Position::new(self.x, self.y));

        if let Some(health) = self.health {
            unit.health = health;
            unit.max_health = health;
        }
        if let Some(attack) = self.attack {
            unit.attack = attack;
        }
        if let Some(defense) = self.defense {
            unit.defense = defense;
        }
        if let Some(speed) = self.speed {
            unit.speed = speed;
        }
        if let Some(range) = self.range {
            unit.range = range;
        }
        Ok(unit)
    }
}

/// One terrain cell override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSpec {
    pub x: i32,
    pub y: i32,
    pub kind: String,
    /// Defaults to the known cost for `kind` (1.0 for unknown kinds)
    #[serde(default)]
    pub move_cost: Option<f64>,
}

impl TerrainSpec {
    pub fn to_cell(&self) -> TerrainCell {
        match self.move_cost {
            Some(cost) => TerrainCell::new(self.kind.clone(), cost),
            None => TerrainCell::named(&self.kind),
        }
    }
}

/// A complete battle setup
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub grid: EngineConfig,
    /// Team label -> strategy. Teams without an entry idle.
    #[serde(default)]
    pub teams: BTreeMap<String, StrategyProfile>,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
    #[serde(default)]
    pub terrain: Vec<TerrainSpec>,
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&contents)?;
        tracing::debug!(
            "Loaded scenario {} ({} units, {} teams)",
            path.display(),
            scenario.units.len(),
            scenario.teams.len()
        );
        Ok(scenario)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn with_max_ticks(mut self, max_ticks: Tick) -> Self {
        self.grid.max_ticks = max_ticks;
        self
    }

    /// Replace the seed of every seeded strategy; teams get consecutive seeds
    pub fn with_seed(mut self, seed: u64) -> Self {
        for (offset, profile) in self.teams.values_mut().enumerate() {
            *profile = profile.reseeded(seed.wrapping_add(offset as u64));
        }
        self
    }

    /// Check the whole scenario without building an engine
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;

        let mut seen = HashSet::new();
        for entry in &self.units {
            if !seen.insert(entry.id.as_str()) {
                return Err(SimError::DuplicateUnit(entry.id.clone()));
            }
            if !self.on_grid(entry.x, entry.y) {
                return Err(SimError::UnitOutOfBounds {
                    id: entry.id.clone(),
                    x: entry.x,
                    y: entry.y,
                });
            }
            if let Some(label) = &entry.preset {
                label.parse::<UnitType>()?;
            }
        }

        for entry in &self.terrain {
            if !self.on_grid(entry.x, entry.y) {
                return Err(SimError::TerrainOutOfBounds { x: entry.x, y: entry.y });
            }
        }
        Ok(())
    }

    /// Validate, then build an engine with units, terrain and providers in place
    ///
    /// The engine is not initialized; call `run` or `initialize`.
    pub fn build_engine(&self) -> Result<BattleEngine> {
        self.validate()?;

        let mut engine = BattleEngine::with_config(self.grid)?;
        for entry in &self.terrain {
            engine.set_terrain_cell(Position::new(entry.x, entry.y), entry.to_cell());
        }
        for entry in &self.units {
            engine.try_add_unit(entry.to_unit()?)?;
        }
        for (team, profile) in &self.teams {
            engine.set_boxed_provider(team.clone(), profile.build());
        }
        Ok(engine)
    }

    fn on_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.grid.width && (y as u32) < self.grid.height
    }
}
