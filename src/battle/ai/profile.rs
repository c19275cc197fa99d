//! Strategy profiles loaded from scenario TOML
//!
//! A profile names one of the built-in providers plus its tuning.

use serde::{Deserialize, Serialize};

use crate::battle::ai::strategies::{
    Advance, Aggressive, AttackNearest, Defensive, HoldPosition, Wanderer,
};
use crate::battle::ai::DecisionProvider;
use crate::core::error::{Result, SimError};

fn default_engage_radius() -> i32 {
    Defensive::DEFAULT_ENGAGE_RADIUS
}

/// Built-in team strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum StrategyProfile {
    Idle,
    Attack,
    Aggressive,
    Defensive {
        #[serde(default = "default_engage_radius")]
        engage_radius: i32,
    },
    Advance,
    Wander {
        #[serde(default)]
        seed: u64,
    },
}

impl Default for StrategyProfile {
    fn default() -> Self {
        StrategyProfile::Aggressive
    }
}

impl StrategyProfile {
    pub const NAMES: [&'static str; 6] = ["idle", "attack", "aggressive", "defensive", "advance", "wander"];

    /// Profile by name with default tuning
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "idle" => Ok(StrategyProfile::Idle),
            "attack" => Ok(StrategyProfile::Attack),
            "aggressive" => Ok(StrategyProfile::Aggressive),
            "defensive" => Ok(StrategyProfile::Defensive {
                engage_radius: default_engage_radius(),
            }),
            "advance" => Ok(StrategyProfile::Advance),
            "wander" => Ok(StrategyProfile::Wander { seed: 0 }),
            other => Err(SimError::UnknownStrategy(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyProfile::Idle => "idle",
            StrategyProfile::Attack => "attack",
            StrategyProfile::Aggressive => "aggressive",
            StrategyProfile::Defensive { .. } => "defensive",
            StrategyProfile::Advance => "advance",
            StrategyProfile::Wander { .. } => "wander",
        }
    }

    /// Same profile with its seed replaced (only `wander` uses one)
    pub fn reseeded(self, new_seed: u64) -> Self {
        match self {
            StrategyProfile::Wander { .. } => StrategyProfile::Wander { seed: new_seed },
            other => other,
        }
    }

    /// Instantiate the provider
    pub fn build(&self) -> Box<dyn DecisionProvider> {
        match *self {
            StrategyProfile::Idle => Box::new(HoldPosition),
            StrategyProfile::Attack => Box::new(AttackNearest),
            StrategyProfile::Aggressive => Box::new(Aggressive),
            StrategyProfile::Defensive { engage_radius } => Box::new(Defensive::new(engage_radius)),
            StrategyProfile::Advance => Box::new(Advance),
            StrategyProfile::Wander { seed } => Box::new(Wanderer::with_seed(seed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_toml_table() {
        let profile: StrategyProfile =
            toml::from_str("strategy = \"defensive\"\nengage_radius = 8").unwrap();
        assert_eq!(profile, StrategyProfile::Defensive { engage_radius: 8 });

        let profile: StrategyProfile = toml::from_str("strategy = \"defensive\"").unwrap();
        assert_eq!(profile, StrategyProfile::Defensive { engage_radius: 5 });
    }

    #[test]
    fn test_unknown_strategy_in_toml_fails() {
        assert!(toml::from_str::<StrategyProfile>("strategy = \"berserk\"").is_err());
    }

    #[test]
    fn test_from_name_covers_all_names() {
        for name in StrategyProfile::NAMES {
            let profile = StrategyProfile::from_name(name).unwrap();
            assert_eq!(profile.name(), name);
            assert_eq!(profile.build().name(), name);
        }
        assert!(matches!(
            StrategyProfile::from_name("berserk"),
            Err(SimError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_reseeded_only_touches_wander() {
        assert_eq!(
            StrategyProfile::Wander { seed: 1 }.reseeded(7),
            StrategyProfile::Wander { seed: 7 }
        );
        assert_eq!(StrategyProfile::Advance.reseeded(7), StrategyProfile::Advance);
    }
}
