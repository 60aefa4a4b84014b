//! Creature slots.
//!
//! Every battle puts exactly two creatures on the table. Cards, bets and
//! combat roles all address a creature by its `CreatureSlot`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Which of the two creatures in the current battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureSlot {
    First,
    Second,
}

impl CreatureSlot {
    /// Both slots in table order.
    pub const ALL: [CreatureSlot; 2] = [CreatureSlot::First, CreatureSlot::Second];

    /// Get the 0-based index of this slot.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            CreatureSlot::First => 0,
            CreatureSlot::Second => 1,
        }
    }

    /// The opposing slot.
    #[must_use]
    pub const fn other(self) -> CreatureSlot {
        match self {
            CreatureSlot::First => CreatureSlot::Second,
            CreatureSlot::Second => CreatureSlot::First,
        }
    }
}

impl std::fmt::Display for CreatureSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreatureSlot::First => write!(f, "Creature 1"),
            CreatureSlot::Second => write!(f, "Creature 2"),
        }
    }
}

/// One value per creature slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPair<T> {
    data: [T; 2],
}

impl<T> SlotPair<T> {
    /// Create a pair from the first and second slot values.
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a pair with values from a factory function.
    pub fn from_fn(factory: impl Fn(CreatureSlot) -> T) -> Self {
        Self::new(factory(CreatureSlot::First), factory(CreatureSlot::Second))
    }

    /// Borrow both slots mutably, `slot` first.
    ///
    /// Returns `(slot, slot.other())`.
    pub fn pair_mut(&mut self, slot: CreatureSlot) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        match slot {
            CreatureSlot::First => (first, second),
            CreatureSlot::Second => (second, first),
        }
    }

    /// Iterate over (CreatureSlot, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CreatureSlot, &T)> {
        CreatureSlot::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (CreatureSlot, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CreatureSlot, &mut T)> {
        CreatureSlot::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<CreatureSlot> for SlotPair<T> {
    type Output = T;

    fn index(&self, slot: CreatureSlot) -> &Self::Output {
        &self.data[slot.index()]
    }
}

impl<T> IndexMut<CreatureSlot> for SlotPair<T> {
    fn index_mut(&mut self, slot: CreatureSlot) -> &mut Self::Output {
        &mut self.data[slot.index()]
    }
}
