//! Match-level errors.
//!
//! Two kinds of failure reach the caller:
//!
//! - `PlayRejection`: a card play was refused. Nothing changed; the player
//!   may try something else.
//! - `MatchError`: the match cannot continue (or an entry point was used in
//!   the wrong phase).

use super::config::ConfigError;
use super::slot::CreatureSlot;
use super::state::Phase;
use crate::cards::CardId;

/// Why a card play was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayRejection {
    #[error("cards can only be played during a player's turn (phase is {0:?})")]
    WrongPhase(Phase),
    #[error("card '{0}' is not in the current player's hand")]
    CardNotInHand(CardId),
    #[error("card '{0}' is not in the catalog")]
    UnknownCard(CardId),
    #[error("not enough points: card costs {cost}, {remaining} left this turn")]
    InsufficientPoints { cost: u32, remaining: u32 },
    #[error("betting on {slot} is blocked until round {until_round} has passed")]
    BettingBlocked { slot: CreatureSlot, until_round: u32 },
}

/// Fatal or out-of-phase match failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MatchError {
    #[error("the draw pile is empty")]
    DeckExhausted,
    #[error("a battle needs two creatures, the catalog has {available}")]
    NotEnoughCreatures { available: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("the match was aborted by an earlier error")]
    MatchAborted,
    #[error("{operation} is not allowed during {phase:?}")]
    InvalidPhase { operation: &'static str, phase: Phase },
    #[error("duel did not finish within {steps} steps")]
    DuelStalled { steps: u32 },
}

impl MatchError {
    /// Whether this error ended the match.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MatchError::DeckExhausted
                | MatchError::NotEnoughCreatures { .. }
                | MatchError::MatchAborted
                | MatchError::DuelStalled { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let err = PlayRejection::InsufficientPoints { cost: 2, remaining: 1 };
        assert_eq!(err.to_string(), "not enough points: card costs 2, 1 left this turn");

        let err = PlayRejection::BettingBlocked {
            slot: CreatureSlot::Second,
            until_round: 3,
        };
        assert_eq!(
            err.to_string(),
            "betting on Creature 2 is blocked until round 3 has passed"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(MatchError::DeckExhausted.is_fatal());
        assert!(MatchError::NotEnoughCreatures { available: 1 }.is_fatal());
        let err = MatchError::InvalidPhase {
            operation: "battle_step",
            phase: Phase::PlayerOneTurn,
        };
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "battle_step is not allowed during PlayerOneTurn");
        assert!(!MatchError::from(ConfigError::ZeroCount("MAX_BATTLES")).is_fatal());
    }
}
