//! Effect resolution - applying card effects to a creature and the bet ledger.
//!
//! The resolver never fails hard. A malformed descriptor is reported as
//! `EffectOutcome::Malformed` (and logged), the effect is skipped and the
//! remaining effects of the same card still apply.

use tracing::warn;

use super::effect::{Effect, EffectError};
use crate::cards::{CardTemplate, CreatureInstance, EffectSpec};
use crate::core::{Config, CreatureSlot, Player};
use crate::wager::BetLedger;

/// Who is playing the card, when, and on which creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectContext {
    pub acting_player: Player,
    pub current_round: u32,
    pub target: CreatureSlot,
}

impl EffectContext {
    #[must_use]
    pub fn new(acting_player: Player, current_round: u32, target: CreatureSlot) -> Self {
        Self {
            acting_player,
            current_round,
            target,
        }
    }

    /// Last round a betting block placed now should cover.
    ///
    /// Player 1 acts before their opponent, so blocking the current round
    /// is enough. Player 2 acts last, so the block has to reach into the
    /// next round to matter.
    #[must_use]
    pub fn block_until_round(&self) -> u32 {
        match self.acting_player {
            Player::One => self.current_round,
            Player::Two => self.current_round + 1,
        }
    }
}

/// Result of applying one effect descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The effect changed the creature or the ledger.
    Applied(Effect),
    /// Blank descriptor; nothing to do.
    Ignored,
    /// Descriptor could not be understood; skipped.
    Malformed(EffectError),
}

impl EffectOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, EffectOutcome::Applied(_))
    }
}

/// Applies effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply a typed effect.
    ///
    /// Stat increments are floored but do not trigger a dynamic recompute;
    /// `apply_card` does that once per card.
    pub fn apply(
        effect: Effect,
        context: &EffectContext,
        target: &mut CreatureInstance,
        bets: &mut BetLedger,
        config: &Config,
    ) {
        match effect {
            Effect::IncrementStat { stat, amount } => target.increment(stat, amount),

            Effect::ReduceOpponentBet { amount } => {
                let opponent = context.acting_player.opponent();
                bets.reduce(opponent, context.target, amount);
                target.bonus_rate_points =
                    bets.bonus_rate_points(context.target, config.bet_amount_per_rp);
            }

            Effect::BlockBetting => {
                target.betting_blocked_until_round = context.block_until_round();
            }
        }
    }

    /// Parse and apply a raw descriptor.
    pub fn apply_effect(
        spec: &EffectSpec,
        context: &EffectContext,
        target: &mut CreatureInstance,
        bets: &mut BetLedger,
        config: &Config,
    ) -> EffectOutcome {
        match Effect::parse(spec) {
            Ok(Some(effect)) => {
                Self::apply(effect, context, target, bets, config);
                EffectOutcome::Applied(effect)
            }
            Ok(None) => EffectOutcome::Ignored,
            Err(error) => {
                warn!(
                    op = ?spec.op,
                    path = ?spec.path,
                    value = ?spec.value,
                    %error,
                    "skipping malformed effect"
                );
                EffectOutcome::Malformed(error)
            }
        }
    }

    /// Apply every effect of a card played as a buff, then recompute
    /// the target's dynamic stats.
    pub fn apply_card(
        card: &CardTemplate,
        context: &EffectContext,
        target: &mut CreatureInstance,
        bets: &mut BetLedger,
        config: &Config,
    ) -> Vec<EffectOutcome> {
        let outcomes = card
            .effects
            .iter()
            .map(|spec| Self::apply_effect(spec, context, target, bets, config))
            .collect();
        target.recalculate_dynamic_stats();
        outcomes
    }
}
