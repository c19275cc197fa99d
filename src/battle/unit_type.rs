//! Unit presets and their default stats
//!
//! A preset only seeds a unit's stat block and type label. The engine never
//! branches on the type label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::SimError;

/// Named stat preset for a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Soldier, // Balanced infantry
    Archer,  // Long range, fragile
    Tank,    // Heavy armor
    Drone,   // Fast recon
    Sniper,  // Extreme range, high damage
    Medic,   // Weak attacker, sturdy
}

/// Default stat block for a unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub range: i32,
}

impl UnitType {
    pub const ALL: [UnitType; 6] = [
        UnitType::Soldier,
        UnitType::Archer,
        UnitType::Tank,
        UnitType::Drone,
        UnitType::Sniper,
        UnitType::Medic,
    ];

    /// Get default stats for this unit type
    pub fn default_stats(&self) -> UnitStats {
        match self {
            UnitType::Soldier => UnitStats {
                health: 100,
                attack: 15,
                defense: 10,
                speed: 3,
                range: 1,
            },
            UnitType::Archer => UnitStats {
                health: 80,
                attack: 20,
                defense: 5,
                speed: 2,
                range: 3,
            },
            UnitType::Tank => UnitStats {
                health: 150,
                attack: 25,
                defense: 20,
                speed: 2,
                range: 2,
            },
            UnitType::Drone => UnitStats {
                health: 50,
                attack: 12,
                defense: 2,
                speed: 5,
                range: 4,
            },
            UnitType::Sniper => UnitStats {
                health: 60,
                attack: 35,
                defense: 3,
                speed: 2,
                range: 5,
            },
            UnitType::Medic => UnitStats {
                health: 70,
                attack: 5,
                defense: 8,
                speed: 3,
                range: 1,
            },
        }
    }

    /// Label stored in `Unit::unit_type`
    pub fn label(&self) -> &'static str {
        match self {
            UnitType::Soldier => "soldier",
            UnitType::Archer => "archer",
            UnitType::Tank => "tank",
            UnitType::Drone => "drone",
            UnitType::Sniper => "sniper",
            UnitType::Medic => "medic",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UnitType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnknownPreset(s.to_string()))
    }
}
