//! Combat resolution
//!
//! Damage is flat: attack minus half the defender's defense, floored at one.

use crate::battle::constants::{DEFENSE_MITIGATION, MIN_DAMAGE};

/// Damage an attack deals: `max(1, attack - floor(defense * 0.5))`
pub fn calculate_damage(attack: i32, defense: i32) -> i32 {
    let mitigation = (f64::from(defense) * DEFENSE_MITIGATION).floor() as i32;
    attack.saturating_sub(mitigation).max(MIN_DAMAGE)
}
