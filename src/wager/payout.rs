//! Battle settlement.
//!
//! ## Net profit
//!
//! For each player: `stake_on_winner * multiplier(tier) - stake_on_loser`.
//! The winnings are truncated toward zero before the loss is subtracted.
//!
//! ## Thief
//!
//! When the winning creature is a thief, the player with the strictly
//! greater net profit loses `THIEF_STEAL_AMOUNT`. Equal profits are left
//! alone.

use serde::{Deserialize, Serialize};

use super::ledger::BetLedger;
use super::tier::RewardTier;
use crate::core::{Config, CreatureSlot, Player, PlayerMap};

/// Amount a winning thief takes from the most profitable player.
pub const THIEF_STEAL_AMOUNT: i64 = 400;

/// Summary of one resolved battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    /// Slot of the creature that won the duel.
    pub winner: CreatureSlot,
    /// Tier of the winner measured against the loser.
    pub tier: RewardTier,
    /// Net profit per player, thief already applied.
    pub net_profit: PlayerMap<i64>,
    /// Whether the thief rule took money from anyone. A thief winner
    /// facing equal profits steals nothing.
    pub thief_triggered: bool,
    /// Player the thief actually robbed, if any.
    pub thief_victim: Option<Player>,
}

/// Compute each player's net profit for a battle won by `winner`.
#[must_use]
pub fn net_profits(
    bets: &BetLedger,
    winner: CreatureSlot,
    tier: RewardTier,
    config: &Config,
) -> PlayerMap<i64> {
    let multiplier = tier.multiplier(config);
    PlayerMap::new(|player| {
        let winnings = (bets.stake(player, winner) as f64 * multiplier) as i64;
        let losses = bets.stake(player, winner.other());
        winnings.saturating_sub(losses)
    })
}

/// Apply the thief rule in place. Returns the robbed player.
pub fn apply_thief(net_profit: &mut PlayerMap<i64>) -> Option<Player> {
    let (one, two) = (net_profit[Player::One], net_profit[Player::Two]);
    let victim = match one.cmp(&two) {
        std::cmp::Ordering::Greater => Player::One,
        std::cmp::Ordering::Less => Player::Two,
        std::cmp::Ordering::Equal => return None,
    };
    net_profit[victim] = net_profit[victim].saturating_sub(THIEF_STEAL_AMOUNT);
    Some(victim)
}

/// Settle a battle: compute profits and apply the thief rule if the winner has it.
#[must_use]
pub fn settle(
    bets: &BetLedger,
    winner: CreatureSlot,
    tier: RewardTier,
    winner_is_thief: bool,
    config: &Config,
) -> Payout {
    let mut net_profit = net_profits(bets, winner, tier, config);
    let thief_victim = if winner_is_thief {
        apply_thief(&mut net_profit)
    } else {
        None
    };

    Payout {
        winner,
        tier,
        net_profit,
        thief_triggered: thief_victim.is_some(),
        thief_victim,
    }
}

/// Cumulative scores across the battles of one match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: PlayerMap<i64>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a battle's net profits to the running totals.
    pub fn record(&mut self, payout: &Payout) {
        for (player, total) in self.totals.iter_mut() {
            *total = total.saturating_add(payout.net_profit[player]);
        }
    }

    #[must_use]
    pub fn total(&self, player: Player) -> i64 {
        self.totals[player]
    }

    /// Both totals.
    #[must_use]
    pub fn totals(&self) -> &PlayerMap<i64> {
        &self.totals
    }

    /// Zero both totals for a new match.
    pub fn reset(&mut self) {
        self.totals = PlayerMap::default();
    }
}
