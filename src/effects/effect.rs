//! Effect definitions.
//!
//! Card data describes effects as loose `(op, path, value)` descriptors.
//! `Effect::parse` turns each descriptor into one of a closed set of typed
//! effects, so every operation the engine knows about is matched
//! exhaustively and anything else is rejected with an `EffectError`.
//!
//! | op             | path              | effect                  |
//! |----------------|-------------------|-------------------------|
//! | `inc`          | `/health` etc.    | `IncrementStat`         |
//! | `dec_bet`      | `/opponent_bets`  | `ReduceOpponentBet`     |
//! | `apply_status` | `/block_betting`  | `BlockBetting`          |

use serde::{Deserialize, Serialize};

use crate::cards::EffectSpec;

pub const OP_INC: &str = "inc";
pub const OP_DEC_BET: &str = "dec_bet";
pub const OP_APPLY_STATUS: &str = "apply_status";

pub const PATH_OPPONENT_BETS: &str = "/opponent_bets";
pub const PATH_BLOCK_BETTING: &str = "/block_betting";

/// Creature stat addressable by `inc` effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Health,
    Attack,
    Defense,
    RatePoints,
}

impl Stat {
    /// Look up a stat by its data path (`/attack`, ...).
    #[must_use]
    pub fn from_path(path: &str) -> Option<Stat> {
        match path {
            "/health" => Some(Stat::Health),
            "/attack" => Some(Stat::Attack),
            "/defense" => Some(Stat::Defense),
            "/ratePoints" => Some(Stat::RatePoints),
            _ => None,
        }
    }

    /// The data path of this stat.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Stat::Health => "/health",
            Stat::Attack => "/attack",
            Stat::Defense => "/defense",
            Stat::RatePoints => "/ratePoints",
        }
    }
}

/// Why an effect descriptor could not be turned into an `Effect`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("unsupported operation '{0}'")]
    UnknownOperation(String),
    #[error("operation '{op}' does not support path '{path}'")]
    UnsupportedPath { op: String, path: String },
    #[error("operation '{op}' is missing its {component}")]
    MissingComponent { op: String, component: &'static str },
}

/// A typed card effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Add `amount` (possibly negative) to a stat of the target creature.
    IncrementStat { stat: Stat, amount: i32 },

    /// Lower the opposing player's stake on the target creature.
    ReduceOpponentBet { amount: i64 },

    /// Close betting on the target creature until the round ends for both players.
    BlockBetting,
}

impl Effect {
    /// Parse a raw descriptor.
    ///
    /// Returns `Ok(None)` for a descriptor with no (or a blank) operation;
    /// such entries are placeholders and are skipped without a diagnostic.
    pub fn parse(spec: &EffectSpec) -> Result<Option<Effect>, EffectError> {
        let op = match spec.op.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(op) => op,
        };

        if !matches!(op, OP_INC | OP_DEC_BET | OP_APPLY_STATUS) {
            return Err(EffectError::UnknownOperation(op.to_string()));
        }

        let path = spec.path.as_deref().ok_or_else(|| EffectError::MissingComponent {
            op: op.to_string(),
            component: "path",
        })?;
        let value = spec.value.ok_or_else(|| EffectError::MissingComponent {
            op: op.to_string(),
            component: "value",
        })?;

        let unsupported = || EffectError::UnsupportedPath {
            op: op.to_string(),
            path: path.to_string(),
        };

        let effect = match op {
            OP_INC => Effect::IncrementStat {
                stat: Stat::from_path(path).ok_or_else(unsupported)?,
                amount: value,
            },
            OP_DEC_BET if path == PATH_OPPONENT_BETS => Effect::ReduceOpponentBet {
                amount: i64::from(value),
            },
            OP_APPLY_STATUS if path == PATH_BLOCK_BETTING => Effect::BlockBetting,
            _ => return Err(unsupported()),
        };

        Ok(Some(effect))
    }
}
