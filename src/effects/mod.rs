//! Effect engine for card plays.
//!
//! - `Effect`: closed set of typed effects parsed from card descriptors
//! - `EffectResolver`: applies effects to a creature and the bet ledger
//!
//! Malformed descriptors degrade to skipped effects with a diagnostic;
//! nothing in this module returns an error to the caller.

mod effect;
mod resolver;

pub use effect::{
    Effect, EffectError, Stat, OP_APPLY_STATUS, OP_DEC_BET, OP_INC, PATH_BLOCK_BETTING,
    PATH_OPPONENT_BETS,
};
pub use resolver::{EffectContext, EffectOutcome, EffectResolver};
