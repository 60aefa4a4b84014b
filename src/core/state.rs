//! Match state: turn progression, hands, draw pile, stakes and scores.
//!
//! ## Phases
//!
//! ```text
//! PlayerOneTurn -> PlayerTwoTurn -> PlayerOneTurn -> ... (round + 1 each time)
//!                                \-> BattleInProgress -> BattleResolved
//! ```
//!
//! Any fatal error moves the match to `Aborted`, which is terminal.
//!
//! Hands, the draw pile and the played-card stacks use `im` persistent
//! vectors so the presentation layer can hold a snapshot for free.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::MatchError;
use super::player::{Player, PlayerMap};
use super::slot::{CreatureSlot, SlotPair};
use crate::cards::CardId;
use crate::wager::{BetLedger, ScoreBoard};

/// Where the match is in its turn/round/battle cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PlayerOneTurn,
    PlayerTwoTurn,
    BattleInProgress,
    BattleResolved,
    /// A fatal error ended the match.
    Aborted,
}

impl Phase {
    /// The player allowed to act, if the phase is a turn.
    #[must_use]
    pub fn turn_player(self) -> Option<Player> {
        match self {
            Phase::PlayerOneTurn => Some(Player::One),
            Phase::PlayerTwoTurn => Some(Player::Two),
            _ => None,
        }
    }
}

/// How a card from hand is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// Apply the card's effects to a creature.
    Buff(CreatureSlot),
    /// Stake the card's bet amount on a creature.
    Bet(CreatureSlot),
    /// Throw the card away for the discard cost.
    Discard,
}

impl PlayMode {
    /// Creature the play targets, if any.
    #[must_use]
    pub fn target(self) -> Option<CreatureSlot> {
        match self {
            PlayMode::Buff(slot) | PlayMode::Bet(slot) => Some(slot),
            PlayMode::Discard => None,
        }
    }
}

/// A card that left a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: CardId,
    pub player: Player,
    pub mode: PlayMode,
    /// Round the card was played in.
    pub round: u32,
}

/// Everything about a match except the two creatures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    // === Progression ===
    pub phase: Phase,
    pub current_player: Player,
    /// Points spent by `current_player` this turn.
    pub points_spent: u32,
    /// Current round within the battle (starts at 1).
    pub round: u32,
    /// Current battle within the match (starts at 1).
    pub battle: u32,

    // === Cards ===
    pub hands: PlayerMap<Vector<CardId>>,
    /// Shared influence deck. Cards are drawn from the back.
    pub draw_pile: Vector<CardId>,
    /// Cards played onto each creature, in play order.
    pub played: SlotPair<Vector<PlayedCard>>,
    pub discarded: Vector<PlayedCard>,

    // === Wagers ===
    pub bets: BetLedger,
    pub scores: ScoreBoard,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// State at the start of the first battle, before any cards are dealt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::PlayerOneTurn,
            current_player: Player::One,
            points_spent: 0,
            round: 1,
            battle: 1,
            hands: PlayerMap::default(),
            draw_pile: Vector::new(),
            played: SlotPair::default(),
            discarded: Vector::new(),
            bets: BetLedger::new(),
            scores: ScoreBoard::new(),
        }
    }

    /// Points the current player may still spend this turn.
    #[must_use]
    pub fn remaining_points(&self, max_turn_points: u32) -> u32 {
        max_turn_points.saturating_sub(self.points_spent)
    }

    #[must_use]
    pub fn hand(&self, player: Player) -> &Vector<CardId> {
        &self.hands[player]
    }

    /// Whether `player` holds a copy of `card`.
    #[must_use]
    pub fn holds(&self, player: Player, card: &str) -> bool {
        self.hands[player].iter().any(|c| c.as_str() == card)
    }

    /// Remove one copy of `card` from a hand.
    pub fn take_from_hand(&mut self, player: Player, card: &str) -> Option<CardId> {
        let index = self.hands[player].iter().position(|c| c.as_str() == card)?;
        Some(self.hands[player].remove(index))
    }

    /// Move the top card of the draw pile into a hand.
    pub fn draw(&mut self, player: Player) -> Result<CardId, MatchError> {
        let card = self.draw_pile.pop_back().ok_or(MatchError::DeckExhausted)?;
        self.hands[player].push_back(card.clone());
        Ok(card)
    }

    /// Draw until `player` holds `max_hand_size` cards. Returns the number drawn.
    pub fn top_up(&mut self, player: Player, max_hand_size: usize) -> Result<usize, MatchError> {
        let mut drawn = 0;
        while self.hands[player].len() < max_hand_size {
            self.draw(player)?;
            drawn += 1;
        }
        Ok(drawn)
    }

    /// Hand the turn to `player` with a fresh point budget.
    pub fn begin_turn(&mut self, player: Player) {
        self.current_player = player;
        self.points_spent = 0;
        self.phase = match player {
            Player::One => Phase::PlayerOneTurn,
            Player::Two => Phase::PlayerTwoTurn,
        };
    }

    /// Clear everything a battle owns. Battle number and scores are kept.
    pub fn reset_battle(&mut self) {
        self.begin_turn(Player::One);
        self.round = 1;
        self.hands = PlayerMap::default();
        self.draw_pile = Vector::new();
        self.played = SlotPair::default();
        self.discarded = Vector::new();
        self.bets.clear();
    }
}
