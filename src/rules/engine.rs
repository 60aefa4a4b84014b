//! The match controller.
//!
//! `MatchEngine` owns one match: the state machine, the two creatures of
//! the current battle, the running duel and the random source. Every
//! public entry point is a single atomic transition.
//!
//! ## Entry points
//!
//! | call             | allowed in                       |
//! |------------------|----------------------------------|
//! | `play_card`      | `PlayerOneTurn`, `PlayerTwoTurn` |
//! | `end_turn`       | `PlayerOneTurn`, `PlayerTwoTurn` |
//! | `battle_step`    | `BattleInProgress`               |
//! | `resolve_battle` | `BattleInProgress`               |
//! | `next_battle`    | `BattleResolved`                 |
//!
//! Rejected plays return `PlayRejection` and change nothing. A fatal
//! `MatchError` (empty draw pile, too few creatures, stalled duel) moves
//! the match to `Phase::Aborted`; every later call fails with
//! `MatchError::MatchAborted`.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wager_arena::cards::{CardCatalog, CardTemplate};
//! use wager_arena::core::{Config, CreatureSlot, Phase, PlayMode, Player};
//! use wager_arena::rules::MatchEngine;
//!
//! let catalog = CardCatalog::from_parts(
//!     [
//!         CardTemplate::creature("orc", 20, 8, 1, 8),
//!         CardTemplate::creature("elf", 14, 6, 2, 10),
//!     ],
//!     [CardTemplate::influence("wager", 1).with_bet(300).with_count(40)],
//! )
//! .unwrap();
//!
//! let mut engine = MatchEngine::new(Config::default(), Arc::new(catalog), 7).unwrap();
//! engine.play_card("wager", PlayMode::Bet(CreatureSlot::First)).unwrap();
//! assert_eq!(engine.state().bets.stake(Player::One, CreatureSlot::First), 300);
//!
//! while engine.phase() != Phase::BattleInProgress {
//!     engine.end_turn().unwrap();
//! }
//! let payout = engine.resolve_battle().unwrap();
//! assert_eq!(engine.phase(), Phase::BattleResolved);
//! assert_eq!(engine.state().scores.total(Player::One), payout.net_profit[Player::One]);
//! ```

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::snapshot::CreatureSnapshot;
use crate::cards::{CardCatalog, CardId, CreatureInstance};
use crate::combat::{Duel, StepReport, MAX_DUEL_STEPS};
use crate::core::{
    Config, CreatureSlot, GameRng, GameRngState, MatchError, MatchState, Phase, PlayMode,
    PlayRejection, PlayedCard, Player, PlayerMap, RandomSource, SlotPair,
};
use crate::effects::{EffectContext, EffectOutcome, EffectResolver};
use crate::wager::{reward_tier, settle, Payout, RewardTier};

/// Result of an accepted card play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub card: CardId,
    pub player: Player,
    pub mode: PlayMode,
    /// Points charged for the play.
    pub cost: u32,
    /// Points the player has left this turn.
    pub points_remaining: u32,
    /// Per-effect results of a buff play.
    pub effects: Vec<EffectOutcome>,
    /// Amount the ledger actually took from a bet play.
    pub staked: i64,
}

/// Result of `end_turn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The next player's turn started.
    NextTurn {
        player: Player,
        round: u32,
        /// Cards drawn to top up their hand.
        drawn: usize,
    },
    /// The last round ended and the duel is ready to step.
    BattleStarted { first_attacker: CreatureSlot },
}

/// Result of `next_battle`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleTransition {
    /// Number of the battle that just started.
    pub battle: u32,
    /// The previous battle was the last of its match; scores were reset.
    pub match_complete: bool,
    /// Totals of the finished match, when `match_complete`.
    pub final_scores: Option<PlayerMap<i64>>,
}

/// Turn/round/battle state machine for one two-player match.
#[derive(Debug)]
pub struct MatchEngine<R: RandomSource = GameRng> {
    config: Config,
    catalog: Arc<CardCatalog>,
    rng: R,
    state: MatchState,
    creatures: SlotPair<CreatureInstance>,
    duel: Option<Duel>,
    last_payout: Option<Payout>,
}

impl MatchEngine<GameRng> {
    /// Start a match seeded with `seed`.
    pub fn new(config: Config, catalog: Arc<CardCatalog>, seed: u64) -> Result<Self, MatchError> {
        Self::with_rng(config, catalog, GameRng::new(seed))
    }

    /// Capture the RNG position for a replay.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}

impl<R: RandomSource> MatchEngine<R> {
    /// Start a match driven by `rng`: pick two creatures, build and shuffle
    /// the influence deck, deal starting hands.
    pub fn with_rng(config: Config, catalog: Arc<CardCatalog>, mut rng: R) -> Result<Self, MatchError> {
        config.validate()?;

        let creatures = pick_creatures(&catalog, &mut rng)?;
        let mut state = MatchState::new();
        deal(&mut state, &catalog, &config, &mut rng)?;

        info!(
            battle = state.battle,
            first = %creatures[CreatureSlot::First].card_id,
            second = %creatures[CreatureSlot::Second].card_id,
            "battle set up"
        );

        Ok(Self {
            config,
            catalog,
            rng,
            state,
            creatures,
            duel: None,
            last_payout: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.state.current_player
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    #[must_use]
    pub fn battle(&self) -> u32 {
        self.state.battle
    }

    /// Points the current player may still spend.
    #[must_use]
    pub fn remaining_points(&self) -> u32 {
        self.state.remaining_points(self.config.max_turn_points)
    }

    #[must_use]
    pub fn hand(&self, player: Player) -> &Vector<CardId> {
        self.state.hand(player)
    }

    #[must_use]
    pub fn creature(&self, slot: CreatureSlot) -> &CreatureInstance {
        &self.creatures[slot]
    }

    #[must_use]
    pub fn creatures(&self) -> &SlotPair<CreatureInstance> {
        &self.creatures
    }

    /// Display view of a creature.
    #[must_use]
    pub fn snapshot(&self, slot: CreatureSlot) -> CreatureSnapshot {
        CreatureSnapshot::capture(
            slot,
            &self.creatures[slot],
            &self.creatures[slot.other()],
            self.state.round,
            &self.config,
        )
    }

    /// Cards played onto a creature this battle, in play order.
    #[must_use]
    pub fn played_on(&self, slot: CreatureSlot) -> &Vector<PlayedCard> {
        &self.state.played[slot]
    }

    /// Tier a bet on `slot` would earn right now.
    #[must_use]
    pub fn reward_preview(&self, slot: CreatureSlot) -> RewardTier {
        reward_tier(
            self.creatures[slot].total_rp(),
            self.creatures[slot.other()].total_rp(),
            &self.config,
        )
    }

    /// The running duel, once the battle has started.
    #[must_use]
    pub fn duel(&self) -> Option<&Duel> {
        self.duel.as_ref()
    }

    /// Settlement of the last resolved battle.
    #[must_use]
    pub fn payout(&self) -> Option<&Payout> {
        self.last_payout.as_ref()
    }

    // === Turns ===

    /// Play a card from the current player's hand.
    ///
    /// Checks run in order: phase, hand, catalog, points, betting block.
    /// A rejected play leaves the match untouched.
    pub fn play_card(&mut self, card: &str, mode: PlayMode) -> Result<PlayOutcome, PlayRejection> {
        let phase = self.state.phase;
        let player = phase.turn_player().ok_or(PlayRejection::WrongPhase(phase))?;

        if !self.state.holds(player, card) {
            return Err(PlayRejection::CardNotInHand(CardId::new(card)));
        }
        let catalog = Arc::clone(&self.catalog);
        let template = catalog
            .get(card)
            .ok_or_else(|| PlayRejection::UnknownCard(CardId::new(card)))?;

        let cost = match mode {
            PlayMode::Discard => self.config.discard_cost,
            PlayMode::Buff(_) | PlayMode::Bet(_) => template.cost,
        };
        let remaining = self.remaining_points();
        if cost > remaining {
            return Err(PlayRejection::InsufficientPoints { cost, remaining });
        }

        if let PlayMode::Bet(slot) = mode {
            let creature = &self.creatures[slot];
            if creature.is_betting_blocked(self.state.round) {
                return Err(PlayRejection::BettingBlocked {
                    slot,
                    until_round: creature.betting_blocked_until_round,
                });
            }
        }

        self.state.points_spent += cost;
        let card_id = self
            .state
            .take_from_hand(player, card)
            .ok_or_else(|| PlayRejection::CardNotInHand(CardId::new(card)))?;

        let played = PlayedCard {
            card: card_id.clone(),
            player,
            mode,
            round: self.state.round,
        };

        let mut effects = Vec::new();
        let mut staked = 0;
        match mode {
            PlayMode::Buff(slot) => {
                let context = EffectContext::new(player, self.state.round, slot);
                effects = EffectResolver::apply_card(
                    template,
                    &context,
                    &mut self.creatures[slot],
                    &mut self.state.bets,
                    &self.config,
                );
                self.state.played[slot].push_back(played);
            }
            PlayMode::Bet(slot) => {
                let amount = template.bet();
                if amount < 0 {
                    warn!(card = %card_id, amount, "negative bet amount stakes nothing");
                }
                staked = self.state.bets.place(player, slot, amount);
                self.creatures[slot].bonus_rate_points = self
                    .state
                    .bets
                    .bonus_rate_points(slot, self.config.bet_amount_per_rp);
                self.state.played[slot].push_back(played);
            }
            PlayMode::Discard => self.state.discarded.push_back(played),
        }

        debug!(
            player = %player,
            card = %card_id,
            mode = ?mode,
            cost,
            spent = self.state.points_spent,
            "card played"
        );

        Ok(PlayOutcome {
            card: card_id,
            player,
            mode,
            cost,
            points_remaining: self.remaining_points(),
            effects,
            staked,
        })
    }

    /// End the current player's turn.
    ///
    /// After player 1 the turn passes to player 2. After player 2 the next
    /// round starts, or the duel begins once the last round is over.
    pub fn end_turn(&mut self) -> Result<TurnOutcome, MatchError> {
        match self.state.phase {
            Phase::PlayerOneTurn => self.hand_off(Player::Two),
            Phase::PlayerTwoTurn if self.state.round < self.config.max_rounds_per_battle => {
                self.state.round += 1;
                self.hand_off(Player::One)
            }
            Phase::PlayerTwoTurn => Ok(self.start_duel()),
            Phase::Aborted => Err(MatchError::MatchAborted),
            phase => Err(MatchError::InvalidPhase {
                operation: "end_turn",
                phase,
            }),
        }
    }

    fn hand_off(&mut self, player: Player) -> Result<TurnOutcome, MatchError> {
        self.state.begin_turn(player);
        let drawn = match self.state.top_up(player, self.config.max_hand_size) {
            Ok(drawn) => drawn,
            Err(error) => return Err(self.abort(error)),
        };

        debug!(player = %player, round = self.state.round, drawn, "turn started");
        Ok(TurnOutcome::NextTurn {
            player,
            round: self.state.round,
            drawn,
        })
    }

    fn start_duel(&mut self) -> TurnOutcome {
        let duel = Duel::begin(&self.creatures, &mut self.rng);
        let first_attacker = duel.attacker();
        self.duel = Some(duel);
        self.state.phase = Phase::BattleInProgress;

        info!(
            battle = self.state.battle,
            first_attacker = %first_attacker,
            "battle started"
        );
        TurnOutcome::BattleStarted { first_attacker }
    }

    // === Battle ===

    /// Play one duel step. The step that fells a creature also settles the battle.
    pub fn battle_step(&mut self) -> Result<StepReport, MatchError> {
        let phase = self.state.phase;
        if phase == Phase::Aborted {
            return Err(MatchError::MatchAborted);
        }
        let invalid = MatchError::InvalidPhase {
            operation: "battle_step",
            phase,
        };
        if phase != Phase::BattleInProgress {
            return Err(invalid);
        }

        let duel = self.duel.as_mut().ok_or_else(|| invalid.clone())?;
        let report = duel
            .step(&mut self.creatures, &self.config, &mut self.rng)
            .ok_or(invalid)?;

        if report.is_terminal() {
            self.settle_battle(report.attacker);
        }
        Ok(report)
    }

    /// Step the duel to the end and settle it.
    ///
    /// Fails with `DuelStalled` (and aborts the match) if the duel runs
    /// `MAX_DUEL_STEPS` steps without a winner.
    pub fn resolve_battle(&mut self) -> Result<Payout, MatchError> {
        loop {
            let report = self.battle_step()?;
            if report.is_terminal() {
                break;
            }
            if report.step >= MAX_DUEL_STEPS {
                warn!(steps = report.step, "duel stalled");
                return Err(self.abort(MatchError::DuelStalled { steps: report.step }));
            }
        }

        self.last_payout.clone().ok_or(MatchError::InvalidPhase {
            operation: "resolve_battle",
            phase: self.state.phase,
        })
    }

    fn settle_battle(&mut self, winner: CreatureSlot) {
        let winning = &self.creatures[winner];
        let losing = &self.creatures[winner.other()];
        let tier = reward_tier(winning.total_rp(), losing.total_rp(), &self.config);
        let payout = settle(&self.state.bets, winner, tier, winning.thief, &self.config);

        self.state.scores.record(&payout);
        self.state.phase = Phase::BattleResolved;

        info!(
            battle = self.state.battle,
            winner = %winner,
            creature = %winning.card_id,
            tier = %tier,
            p1_profit = payout.net_profit[Player::One],
            p2_profit = payout.net_profit[Player::Two],
            thief_victim = ?payout.thief_victim,
            "battle resolved"
        );

        self.last_payout = Some(payout);
    }

    /// Leave a resolved battle and set up the next one.
    ///
    /// After the last battle of a match the scores are reset and battle
    /// numbering starts again at 1.
    pub fn next_battle(&mut self) -> Result<BattleTransition, MatchError> {
        match self.state.phase {
            Phase::BattleResolved => {}
            Phase::Aborted => return Err(MatchError::MatchAborted),
            phase => {
                return Err(MatchError::InvalidPhase {
                    operation: "next_battle",
                    phase,
                })
            }
        }

        let match_complete = self.state.battle >= self.config.max_battles;
        let final_scores = if match_complete {
            let totals = self.state.scores.totals().clone();
            info!(
                p1_total = totals[Player::One],
                p2_total = totals[Player::Two],
                "match complete"
            );
            self.state.scores.reset();
            self.state.battle = 1;
            Some(totals)
        } else {
            self.state.battle += 1;
            None
        };

        self.state.reset_battle();
        self.duel = None;
        self.last_payout = None;

        let creatures = match pick_creatures(&self.catalog, &mut self.rng) {
            Ok(creatures) => creatures,
            Err(error) => return Err(self.abort(error)),
        };
        self.creatures = creatures;
        if let Err(error) = deal(&mut self.state, &self.catalog, &self.config, &mut self.rng) {
            return Err(self.abort(error));
        }

        info!(
            battle = self.state.battle,
            first = %self.creatures[CreatureSlot::First].card_id,
            second = %self.creatures[CreatureSlot::Second].card_id,
            "battle set up"
        );

        Ok(BattleTransition {
            battle: self.state.battle,
            match_complete,
            final_scores,
        })
    }

    fn abort(&mut self, error: MatchError) -> MatchError {
        warn!(%error, battle = self.state.battle, round = self.state.round, "match aborted");
        self.state.phase = Phase::Aborted;
        self.duel = None;
        error
    }
}

/// Draw two distinct creatures at random, in catalog registration order
/// before the shuffle.
fn pick_creatures<R: RandomSource>(
    catalog: &CardCatalog,
    rng: &mut R,
) -> Result<SlotPair<CreatureInstance>, MatchError> {
    let mut ids: Vec<&CardId> = catalog.creature_ids().iter().collect();
    if ids.len() < 2 {
        return Err(MatchError::NotEnoughCreatures { available: ids.len() });
    }
    rng.shuffle(&mut ids);

    let template = |id: &CardId| {
        catalog
            .get(id.as_str())
            .ok_or(MatchError::NotEnoughCreatures {
                available: catalog.creature_ids().len(),
            })
    };
    Ok(SlotPair::new(
        CreatureInstance::from_template(template(ids[0])?),
        CreatureInstance::from_template(template(ids[1])?),
    ))
}

/// Build and shuffle the influence deck, then deal starting hands
/// one card at a time, player 1 first.
fn deal<R: RandomSource>(
    state: &mut MatchState,
    catalog: &CardCatalog,
    config: &Config,
    rng: &mut R,
) -> Result<(), MatchError> {
    let mut deck = catalog.influence_deck();
    rng.shuffle(&mut deck);
    state.draw_pile = deck.into_iter().collect();

    for _ in 0..config.starting_hand_size {
        for player in Player::ALL {
            if let Err(error) = state.draw(player) {
                warn!(%player, "draw pile ran out while dealing");
                return Err(error);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;
    use crate::core::ScriptedDice;

    fn catalog() -> Arc<CardCatalog> {
        let catalog = CardCatalog::from_parts(
            [
                CardTemplate::creature("orc", 20, 8, 1, 8),
                CardTemplate::creature("elf", 14, 6, 2, 10),
            ],
            [
                CardTemplate::influence("wager", 1).with_bet(300).with_count(30),
                CardTemplate::influence("sharpen", 2)
                    .with_effect("inc", "/attack", 2)
                    .with_count(30),
            ],
        )
        .unwrap();
        Arc::new(catalog)
    }

    fn engine() -> MatchEngine<ScriptedDice> {
        MatchEngine::with_rng(Config::default(), catalog(), ScriptedDice::new([])).unwrap()
    }

    #[test]
    fn test_setup_deals_alternating_hands() {
        let engine = engine();

        // ScriptedDice never reorders: orc then elf, and the deck is drawn from the back.
        assert_eq!(engine.creature(CreatureSlot::First).card_id, CardId::new("orc"));
        assert_eq!(engine.creature(CreatureSlot::Second).card_id, CardId::new("elf"));
        assert_eq!(engine.hand(Player::One).len(), 5);
        assert_eq!(engine.hand(Player::Two).len(), 5);
        assert!(engine.hand(Player::One).iter().all(|c| c.as_str() == "sharpen"));
        assert_eq!(engine.state().draw_pile.len(), 50);
    }

    #[test]
    fn test_play_deducts_cost_and_removes_card() {
        let mut engine = engine();

        let outcome = engine
            .play_card("sharpen", PlayMode::Buff(CreatureSlot::Second))
            .unwrap();

        assert_eq!(outcome.cost, 2);
        assert_eq!(outcome.points_remaining, 2);
        assert_eq!(engine.hand(Player::One).len(), 4);
        assert_eq!(engine.creature(CreatureSlot::Second).current_attack, 8);
        assert_eq!(engine.played_on(CreatureSlot::Second).len(), 1);
    }

    #[test]
    fn test_rejected_play_changes_nothing() {
        let mut engine = engine();
        engine.play_card("sharpen", PlayMode::Buff(CreatureSlot::First)).unwrap();
        engine.play_card("sharpen", PlayMode::Discard).unwrap();
        let before = engine.state().clone();

        let err = engine
            .play_card("sharpen", PlayMode::Buff(CreatureSlot::First))
            .unwrap_err();

        assert_eq!(err, PlayRejection::InsufficientPoints { cost: 2, remaining: 1 });
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_card_not_in_hand() {
        let mut engine = engine();
        assert_eq!(
            engine.play_card("wager", PlayMode::Bet(CreatureSlot::First)),
            Err(PlayRejection::CardNotInHand(CardId::new("wager")))
        );
    }

    #[test]
    fn test_end_turn_cycle() {
        let mut engine = engine();
        engine.play_card("sharpen", PlayMode::Discard).unwrap();

        assert_eq!(
            engine.end_turn(),
            Ok(TurnOutcome::NextTurn {
                player: Player::Two,
                round: 1,
                drawn: 0
            })
        );
        assert_eq!(engine.remaining_points(), 4);

        assert_eq!(
            engine.end_turn(),
            Ok(TurnOutcome::NextTurn {
                player: Player::One,
                round: 2,
                drawn: 1
            })
        );
    }

    #[test]
    fn test_phase_guards() {
        let mut engine = engine();
        assert!(matches!(
            engine.battle_step(),
            Err(MatchError::InvalidPhase { operation: "battle_step", .. })
        ));
        assert!(matches!(
            engine.next_battle(),
            Err(MatchError::InvalidPhase { operation: "next_battle", .. })
        ));
    }

    #[test]
    fn test_not_enough_creatures() {
        let catalog = CardCatalog::from_parts(
            [CardTemplate::creature("orc", 20, 8, 1, 8)],
            [CardTemplate::influence("wager", 1).with_count(20)],
        )
        .unwrap();
        let result = MatchEngine::new(Config::default(), Arc::new(catalog), 1);
        assert!(matches!(
            result,
            Err(MatchError::NotEnoughCreatures { available: 1 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config {
            bet_amount_per_rp: 0,
            ..Config::default()
        };
        assert!(matches!(
            MatchEngine::new(config, catalog(), 1),
            Err(MatchError::InvalidConfig(_))
        ));
    }
}
