//! # wager-arena
//!
//! Rules engine for a two-player creature wagering card/dice battler.
//!
//! Each battle puts two creatures on the table. For a fixed number of
//! rounds the players take turns spending a small point budget on
//! influence cards: buffs that change a creature's stats, bets on which
//! creature will win, or control effects such as a betting lockout. Then
//! the creatures fight an automated dice duel and the bets pay out by how
//! much of an underdog the winner was.
//!
//! ## Design Principles
//!
//! 1. **Plain state, explicit transitions**: `MatchEngine` owns the match;
//!    every entry point is one atomic call that either succeeds or returns
//!    a typed reason.
//!
//! 2. **Deterministic**: all dice and shuffles go through a `RandomSource`.
//!    A seeded `GameRng` replays a whole match; `ScriptedDice` pins exact
//!    rolls in tests.
//!
//! 3. **Closed effect set**: card effect descriptors are parsed into a
//!    typed `Effect`; malformed ones are skipped with a diagnostic.
//!
//! ## Modules
//!
//! - `core`: players, creature slots, config, match state, RNG, errors
//! - `cards`: card templates, the catalog, creature instances
//! - `effects`: effect parsing and application
//! - `combat`: attack/defense tiers and the duel
//! - `wager`: stakes, reward tiers, settlement and scores
//! - `rules`: the `MatchEngine` controller
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod rules;
pub mod wager;

// Re-export commonly used types
pub use crate::core::{
    Config, ConfigError, CreatureSlot, GameRng, GameRngState, MatchError, MatchState, Phase,
    PlayMode, PlayRejection, PlayedCard, Player, PlayerMap, RandomSource, ScriptedDice, SlotPair,
};

pub use crate::cards::{
    CardCatalog, CardId, CardRole, CardTemplate, CatalogError, CreatureInstance,
    DynamicStatThreshold, EffectSpec,
};

pub use crate::effects::{Effect, EffectContext, EffectError, EffectOutcome, EffectResolver, Stat};

pub use crate::combat::{DieOutcome, DieRoll, Duel, StepKind, StepReport, StrikeReport};

pub use crate::wager::{BetLedger, Payout, RewardTier, ScoreBoard};

pub use crate::rules::{BattleTransition, CreatureSnapshot, MatchEngine, PlayOutcome, TurnOutcome};
