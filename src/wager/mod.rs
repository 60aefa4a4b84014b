//! Wager engine: stakes, reward tiers and settlement.
//!
//! - `BetLedger`: the four stake counters and the bonus RP they grant
//! - `RewardTier`: payout band from the RP gap between the creatures
//! - `settle` / `Payout`: per-player net profit with the thief rule
//! - `ScoreBoard`: running totals across a match

pub mod ledger;
pub mod payout;
pub mod tier;

pub use ledger::BetLedger;
pub use payout::{apply_thief, net_profits, settle, Payout, ScoreBoard, THIEF_STEAL_AMOUNT};
pub use tier::{reward_tier, RewardTier};
