//! Match controller.
//!
//! `MatchEngine` drives the turn/round/battle cycle and routes card plays
//! to the effect and wager engines. It is the only public surface that
//! mutates a match; everything it exposes for display is read-only.

pub mod engine;
pub mod snapshot;

pub use engine::{BattleTransition, MatchEngine, PlayOutcome, TurnOutcome};
pub use snapshot::CreatureSnapshot;
