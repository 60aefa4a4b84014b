//! Deterministic dice rolling and shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces an identical match
//! - **Serializable**: O(1) state capture and restore for replays
//! - **Pluggable**: Everything that needs randomness takes a `RandomSource`,
//!   so scenarios can be driven by `ScriptedDice` instead
//!
//! ## Usage
//!
//! ```
//! use wager_arena::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let face = rng.roll_die();
//! assert!((1..=6).contains(&face));
//!
//! // Same seed, same rolls
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_d6(3), b.roll_d6(3));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on every die in the game.
pub const DIE_SIDES: u8 = 6;

/// Source of dice rolls and shuffles.
///
/// A match is driven by exactly one source; it is never shared between
/// concurrently running battles.
pub trait RandomSource {
    /// Roll a single six-sided die, returning a face in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, items: &mut [T]);

    /// Roll `count` six-sided dice and return their sum.
    ///
    /// Returns 0 when `count` is 0.
    fn roll_d6(&mut self, count: u32) -> u32 {
        (0..count).map(|_| u32::from(self.roll_die())).sum()
    }
}

/// Seeded RNG used for real matches.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this match was started with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_SIDES)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        use rand::seq::SliceRandom;
        items.shuffle(&mut self.inner);
    }
}

/// Serializable RNG state for replays.
///
/// Uses the ChaCha8 word position so capture is O(1) regardless of
/// how many dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of die faces.
///
/// Shuffles leave the order untouched. Once the script runs out every
/// further roll is a 1.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
}

impl ScriptedDice {
    /// Create a script from the faces to return, in order.
    ///
    /// Faces outside `1..=6` are clamped into range.
    #[must_use]
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().map(|f| f.clamp(1, DIE_SIDES)).collect(),
        }
    }

    /// Append more faces to the end of the script.
    pub fn push(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.faces
            .extend(faces.into_iter().map(|f| f.clamp(1, DIE_SIDES)));
    }

    /// Faces not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RandomSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or(1)
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}
