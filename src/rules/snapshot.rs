//! Read-only creature views for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CreatureInstance};
use crate::combat::{defense_block, dice_count};
use crate::core::{Config, CreatureSlot};
use crate::wager::{reward_tier, RewardTier};

/// Everything a creature pane shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub slot: CreatureSlot,
    pub card_id: CardId,

    pub base_health: i32,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub rate_points: i32,
    pub bonus_rate_points: i32,
    pub total_rp: i32,

    /// Dice the current attack rolls.
    pub dice_count: u32,
    /// Damage the current defense blocks.
    pub defense_block: i32,

    pub magic_barrier: i32,
    pub vampirism: i32,
    pub thief: bool,
    pub is_stunned: bool,
    pub betting_blocked: bool,
    pub betting_blocked_until_round: u32,

    /// Tier a bet on this creature would currently earn.
    pub reward_tier: RewardTier,
}

impl CreatureSnapshot {
    /// Capture `creature` in `slot`, measured against `opponent`.
    #[must_use]
    pub fn capture(
        slot: CreatureSlot,
        creature: &CreatureInstance,
        opponent: &CreatureInstance,
        round: u32,
        config: &Config,
    ) -> Self {
        Self {
            slot,
            card_id: creature.card_id.clone(),
            base_health: creature.base_health,
            health: creature.current_health,
            attack: creature.current_attack,
            defense: creature.current_defense,
            rate_points: creature.current_rate_points,
            bonus_rate_points: creature.bonus_rate_points,
            total_rp: creature.total_rp(),
            dice_count: dice_count(creature.current_attack, config),
            defense_block: defense_block(creature.current_defense, config),
            magic_barrier: creature.magic_barrier,
            vampirism: creature.vampirism,
            thief: creature.thief,
            is_stunned: creature.is_stunned,
            betting_blocked: creature.is_betting_blocked(round),
            betting_blocked_until_round: creature.betting_blocked_until_round,
            reward_tier: reward_tier(creature.total_rp(), opponent.total_rp(), config),
        }
    }

    /// Health clamped at 0 for display.
    #[must_use]
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }
}
