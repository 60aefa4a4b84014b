//! Reward tiers.
//!
//! A bet's multiplier depends on how much of an underdog the backed
//! creature is. Favorites always pay the lowest tier.
//!
//! ```
//! use wager_arena::core::Config;
//! use wager_arena::wager::{reward_tier, RewardTier};
//!
//! let config = Config::default();
//! assert_eq!(reward_tier(10, 13, &config), RewardTier::Yellow);
//! assert_eq!(reward_tier(10, 14, &config), RewardTier::Green);
//! assert_eq!(reward_tier(10, 18, &config), RewardTier::Red);
//! assert_eq!(reward_tier(30, 5, &config), RewardTier::Yellow);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Config;

/// Payout band for a winning bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardTier {
    Yellow,
    Green,
    Red,
}

impl RewardTier {
    /// Configured multiplier for this tier.
    #[must_use]
    pub fn multiplier(self, config: &Config) -> f64 {
        match self {
            RewardTier::Yellow => config.reward_yellow_mult,
            RewardTier::Green => config.reward_green_mult,
            RewardTier::Red => config.reward_red_mult,
        }
    }
}

impl std::fmt::Display for RewardTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RewardTier::Yellow => "yellow",
            RewardTier::Green => "green",
            RewardTier::Red => "red",
        };
        f.write_str(name)
    }
}

/// Tier earned by a bet on a creature rated `backed_rp` against one rated `opposing_rp`.
#[must_use]
pub fn reward_tier(backed_rp: i32, opposing_rp: i32, config: &Config) -> RewardTier {
    let diff = backed_rp.saturating_sub(opposing_rp);
    if diff > 0 {
        return RewardTier::Yellow;
    }

    let disadvantage = diff.saturating_abs();
    if disadvantage < config.bet_reward_green_threshold {
        RewardTier::Yellow
    } else if disadvantage < config.bet_reward_red_threshold {
        RewardTier::Green
    } else {
        RewardTier::Red
    }
}
