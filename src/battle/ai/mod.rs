//! Team decision providers
//!
//! Architecture: Trait + Registry
//! - DecisionProvider trait defines the per-unit decision interface
//! - DecisionRegistry maps a team label to exactly one provider
//! - StrategyProfile names the built-in providers for scenario files

mod profile;
mod strategies;

pub use profile::StrategyProfile;
pub use strategies::{approach, Advance, Aggressive, AttackNearest, Defensive, HoldPosition, Wanderer};

use ahash::AHashMap;
use std::fmt;

use crate::battle::action::Action;
use crate::battle::state::BattleState;
use crate::battle::units::Unit;

/// Produces one `Action` for a unit on the current tick
///
/// Providers see the live state by shared reference and must return
/// immediately. All mutation flows back through the engine.
pub trait DecisionProvider {
    fn decide(&mut self, unit: &Unit, state: &BattleState) -> Action;

    /// Short name for logs and reports
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> DecisionProvider for F
where
    F: FnMut(&Unit, &BattleState) -> Action,
{
    fn decide(&mut self, unit: &Unit, state: &BattleState) -> Action {
        self(unit, state)
    }
}

/// Team label -> decision provider
#[derive(Default)]
pub struct DecisionRegistry {
    providers: AHashMap<String, Box<dyn DecisionProvider>>,
}

impl DecisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider for a team, returning the one it replaces
    pub fn register(
        &mut self,
        team: impl Into<String>,
        provider: Box<dyn DecisionProvider>,
    ) -> Option<Box<dyn DecisionProvider>> {
        let team = team.into();
        tracing::debug!("Registering '{}' decision provider for {}", provider.name(), team);
        self.providers.insert(team, provider)
    }

    /// Register a closure for a team
    pub fn register_fn<F>(&mut self, team: impl Into<String>, callback: F)
    where
        F: FnMut(&Unit, &BattleState) -> Action + 'static,
    {
        self.register(team, Box::new(callback));
    }

    pub fn unregister(&mut self, team: &str) -> Option<Box<dyn DecisionProvider>> {
        self.providers.remove(team)
    }

    pub fn contains(&self, team: &str) -> bool {
        self.providers.contains_key(team)
    }

    /// Registered team labels, sorted
    pub fn teams(&self) -> Vec<&str> {
        let mut teams: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        teams.sort_unstable();
        teams
    }

    /// Ask the unit's team provider for a decision. Teams without one idle.
    pub fn decide(&mut self, unit: &Unit, state: &BattleState) -> Action {
        match self.providers.get_mut(&unit.team) {
            Some(provider) => provider.decide(unit, state),
            None => Action::Idle,
        }
    }
}

impl fmt::Debug for DecisionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for team in self.teams() {
            if let Some(provider) = self.providers.get(team) {
                map.entry(&team, &provider.name());
            }
        }
        map.finish()
    }
}
