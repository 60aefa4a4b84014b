//! Stat tiers: attack to dice count, defense to damage blocked.

use crate::core::Config;

/// Dice rolled by an attacker with `attack`.
///
/// `<= tier 1` rolls one die, `<= tier 2` two, anything higher three.
#[must_use]
pub fn dice_count(attack: i32, config: &Config) -> u32 {
    if attack <= config.attack_tier_1_max {
        1
    } else if attack <= config.attack_tier_2_max {
        2
    } else {
        3
    }
}

/// Flat damage reduction granted by `defense`.
#[must_use]
pub fn defense_block(defense: i32, config: &Config) -> i32 {
    if defense <= 0 {
        0
    } else if defense <= config.defense_tier_1_max {
        1
    } else if defense <= config.defense_tier_2_max {
        2
    } else {
        3
    }
}
