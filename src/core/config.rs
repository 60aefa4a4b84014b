//! Tunable game constants.
//!
//! `Config` is loaded once by the data-loading collaborator and stays
//! read-only for the rest of the process. Field names deserialize from the
//! upper-case keys used by the game's `config.json`; every absent key falls
//! back to its default.
//!
//! ```
//! use wager_arena::core::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.max_turn_points, 4);
//! assert_eq!(config.bet_amount_per_rp, 300);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

/// Invalid combination of tunables.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("BET_AMOUNT_PER_RP must be positive, got {0}")]
    NonPositiveBetAmountPerRp(i64),
    #[error("attack tiers out of order: tier 1 max {tier1} > tier 2 max {tier2}")]
    AttackTiersOutOfOrder { tier1: i32, tier2: i32 },
    #[error("defense tiers out of order: tier 1 max {tier1} > tier 2 max {tier2}")]
    DefenseTiersOutOfOrder { tier1: i32, tier2: i32 },
    #[error("reward thresholds out of order: green {green} > red {red}")]
    RewardThresholdsOutOfOrder { green: i32, red: i32 },
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
}

/// Game tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    // === Hands and turns ===
    /// Cards dealt to each player when a battle starts.
    pub starting_hand_size: usize,
    /// Hands are topped up to this size when a player's turn begins.
    pub max_hand_size: usize,
    /// Points a player may spend in one turn.
    pub max_turn_points: u32,
    /// Points charged for discarding a card.
    pub discard_cost: u32,
    /// Rounds (one turn per player) before the creatures fight.
    pub max_rounds_per_battle: u32,
    /// Battles per match; scores reset after the last one.
    pub max_battles: u32,

    // === Combat tiers ===
    /// Highest attack that still rolls one die.
    pub attack_tier_1_max: i32,
    /// Highest attack that still rolls two dice.
    pub attack_tier_2_max: i32,
    /// Highest defense that blocks one point of damage.
    pub defense_tier_1_max: i32,
    /// Highest defense that blocks two points of damage.
    pub defense_tier_2_max: i32,
    /// Seconds between combat steps. Presentation only.
    pub battle_step_delay: f64,

    // === Wagers ===
    /// RP disadvantage at which a winning bet pays the green multiplier.
    pub bet_reward_green_threshold: i32,
    /// RP disadvantage at which a winning bet pays the red multiplier.
    pub bet_reward_red_threshold: i32,
    pub reward_yellow_mult: f64,
    pub reward_green_mult: f64,
    pub reward_red_mult: f64,
    /// Stake needed on a creature to grant it one bonus RP.
    pub bet_amount_per_rp: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_hand_size: 5,
            max_hand_size: 5,
            max_turn_points: 4,
            discard_cost: 1,
            max_rounds_per_battle: 4,
            max_battles: 3,
            attack_tier_1_max: 6,
            attack_tier_2_max: 14,
            defense_tier_1_max: 3,
            defense_tier_2_max: 8,
            battle_step_delay: 1.0,
            bet_reward_green_threshold: 4,
            bet_reward_red_threshold: 8,
            reward_yellow_mult: 1.0,
            reward_green_mult: 2.0,
            reward_red_mult: 3.0,
            bet_amount_per_rp: 300,
        }
    }
}

impl Config {
    /// Check that the tunables describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bet_amount_per_rp <= 0 {
            return Err(ConfigError::NonPositiveBetAmountPerRp(self.bet_amount_per_rp));
        }
        if self.attack_tier_1_max > self.attack_tier_2_max {
            return Err(ConfigError::AttackTiersOutOfOrder {
                tier1: self.attack_tier_1_max,
                tier2: self.attack_tier_2_max,
            });
        }
        if self.defense_tier_1_max > self.defense_tier_2_max {
            return Err(ConfigError::DefenseTiersOutOfOrder {
                tier1: self.defense_tier_1_max,
                tier2: self.defense_tier_2_max,
            });
        }
        if self.bet_reward_green_threshold > self.bet_reward_red_threshold {
            return Err(ConfigError::RewardThresholdsOutOfOrder {
                green: self.bet_reward_green_threshold,
                red: self.bet_reward_red_threshold,
            });
        }
        if self.max_rounds_per_battle == 0 {
            return Err(ConfigError::ZeroCount("MAX_ROUNDS_PER_BATTLE"));
        }
        if self.max_battles == 0 {
            return Err(ConfigError::ZeroCount("MAX_BATTLES"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "MAX_TURN_POINTS": 6, "BET_AMOUNT_PER_RP": 100, "REWARD_RED_MULT": 4.5 }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.max_turn_points, 6);
        assert_eq!(config.bet_amount_per_rp, 100);
        assert_eq!(config.reward_red_mult, 4.5);
        // untouched keys
        assert_eq!(config.starting_hand_size, 5);
        assert_eq!(config.attack_tier_2_max, 14);
        assert_eq!(config.discard_cost, 1);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_zero_divisor() {
        let config = Config {
            bet_amount_per_rp: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveBetAmountPerRp(0)));
    }

    #[test]
    fn test_validate_rejects_inverted_tiers() {
        let config = Config {
            attack_tier_1_max: 15,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AttackTiersOutOfOrder { tier1: 15, tier2: 14 })
        ));

        let config = Config {
            bet_reward_green_threshold: 9,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RewardThresholdsOutOfOrder { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_rounds() {
        let config = Config {
            max_rounds_per_battle: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCount("MAX_ROUNDS_PER_BATTLE")));
    }
}
