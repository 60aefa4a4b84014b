//! Combat engine: stat tiers and the dice duel.

pub mod duel;
pub mod tiers;

pub use duel::{
    initiative, strike, DieOutcome, DieRoll, Duel, StepKind, StepReport, StrikeReport,
    MAX_DUEL_STEPS,
};
pub use tiers::{defense_block, dice_count};
