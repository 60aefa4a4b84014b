//! Core engine types: players, creature slots, state, RNG, configuration, errors.
//!
//! This module contains the building blocks every other module works with.
//! The game is always two players and two creatures, so both are closed
//! enums with array-backed maps.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod slot;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{MatchError, PlayRejection};
pub use player::{Player, PlayerMap};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedDice, DIE_SIDES};
pub use slot::{CreatureSlot, SlotPair};
pub use state::{MatchState, Phase, PlayMode, PlayedCard};
