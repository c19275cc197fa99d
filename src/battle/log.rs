//! Bounded battle log trail
//!
//! Human-readable only. Nothing in the engine reads it back for control flow.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::battle::constants::LOG_CAPACITY;
use crate::core::types::Tick;

/// Ring buffer of `"[Tick n] message"` lines, oldest evicted first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleLog {
    entries: VecDeque<String>,
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    pub fn push(&mut self, tick: Tick, message: &str) {
        if self.entries.len() == LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(format!("[Tick {}] {}", tick, message));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Owned copy, oldest first
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
