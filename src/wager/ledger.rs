//! Bet ledger: the four per-player, per-creature stake counters.
//!
//! Stakes never go negative. The ledger lives inside `MatchState` and is
//! cleared at the start of every battle.

use serde::{Deserialize, Serialize};

use crate::core::{CreatureSlot, Player, PlayerMap, SlotPair};

/// Stake totals: player 1 and player 2 on each of the two creatures.
///
/// ## Example
///
/// ```
/// use wager_arena::core::{CreatureSlot, Player};
/// use wager_arena::wager::BetLedger;
///
/// let mut bets = BetLedger::new();
/// bets.place(Player::One, CreatureSlot::First, 300);
/// bets.place(Player::Two, CreatureSlot::First, 400);
///
/// assert_eq!(bets.total_on(CreatureSlot::First), 700);
/// assert_eq!(bets.bonus_rate_points(CreatureSlot::First, 300), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLedger {
    stakes: PlayerMap<SlotPair<i64>>,
}

impl BetLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stake of `player` on `slot`.
    #[must_use]
    pub fn stake(&self, player: Player, slot: CreatureSlot) -> i64 {
        self.stakes[player][slot]
    }

    /// Add to a player's stake. Returns the amount actually staked:
    /// negative amounts stake nothing and the total saturates at `i64::MAX`.
    pub fn place(&mut self, player: Player, slot: CreatureSlot, amount: i64) -> i64 {
        let stake = &mut self.stakes[player][slot];
        let before = *stake;
        *stake = before.saturating_add(amount.max(0));
        *stake - before
    }

    /// Lower a player's stake, floored at 0. Returns the amount actually removed.
    pub fn reduce(&mut self, player: Player, slot: CreatureSlot, amount: i64) -> i64 {
        let stake = &mut self.stakes[player][slot];
        let removed = amount.clamp(0, *stake);
        *stake -= removed;
        removed
    }

    /// Combined stake of both players on `slot`.
    #[must_use]
    pub fn total_on(&self, slot: CreatureSlot) -> i64 {
        Player::ALL
            .iter()
            .fold(0i64, |total, &p| total.saturating_add(self.stake(p, slot)))
    }

    /// RP bonus the total stake on `slot` grants: `total / per_rp`.
    ///
    /// A non-positive `per_rp` grants nothing.
    #[must_use]
    pub fn bonus_rate_points(&self, slot: CreatureSlot, per_rp: i64) -> i32 {
        if per_rp <= 0 {
            return 0;
        }
        i32::try_from(self.total_on(slot) / per_rp).unwrap_or(i32::MAX)
    }

    /// Drop every stake.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
