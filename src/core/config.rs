//! Engine configuration
//!
//! Grid dimensions and the tick cap are the only knobs the engine exposes.
//! Gameplay rules (cooldown, damage mitigation, log size) are fixed in
//! `battle::constants`.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_TICKS};
use crate::core::error::{Result, SimError};
use crate::core::types::Tick;

/// Configuration for a single battle engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid width in cells (x axis)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Grid height in cells (y axis)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Safety valve: the battle ends in a draw when the tick counter reaches this
    ///
    /// The terminating tick itself processes no units, so at most
    /// `max_ticks - 1` ticks carry unit actions.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: Tick,
}

fn default_width() -> u32 {
    DEFAULT_GRID_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_GRID_HEIGHT
}

fn default_max_ticks() -> Tick {
    DEFAULT_MAX_TICKS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl EngineConfig {
    pub fn new(width: u32, height: u32, max_ticks: Tick) -> Self {
        Self {
            width,
            height,
            max_ticks,
        }
    }

    /// Reject configurations the engine cannot run on
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_ticks == 0 {
            return Err(SimError::InvalidMaxTicks);
        }
        Ok(())
    }
}
