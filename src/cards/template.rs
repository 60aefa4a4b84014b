//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable definition of a card as supplied by
//! the catalog. The same type covers creature cards (base stats and special
//! properties) and influence cards (cost, bet amount, effects); which role a
//! template plays is decided by the catalog partition it is registered in.
//!
//! Per-match mutable state lives in `CreatureInstance`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Stable string identifier of a card, unique across the whole catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Raw effect descriptor as it appears in card data.
///
/// Any component may be missing. `Effect::parse` turns a descriptor into
/// a typed effect, or explains why it can't.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub op: Option<String>,
    pub path: Option<String>,
    pub value: Option<i32>,
}

impl EffectSpec {
    /// Create a fully specified descriptor.
    #[must_use]
    pub fn new(op: impl Into<String>, path: impl Into<String>, value: i32) -> Self {
        Self {
            op: Some(op.into()),
            path: Some(path.into()),
            value: Some(value),
        }
    }
}

/// Bonus effects granted while a creature's health stays at or above a threshold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicStatThreshold {
    pub threshold_hp: i32,
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
}

/// Immutable card definition.
///
/// Localized `name`/`text` maps are opaque to the engine and only carried
/// along for the presentation layer.
///
/// ## Example
///
/// ```
/// use wager_arena::cards::CardTemplate;
///
/// let knight = CardTemplate::creature("knight", 20, 7, 4, 10).with_magic_barrier(1);
/// assert_eq!(knight.attack, 7);
/// assert_eq!(knight.magic_barrier, Some(1));
///
/// let sharpen = CardTemplate::influence("sharpen", 2).with_effect("inc", "/attack", 3);
/// assert_eq!(sharpen.stat_change("/attack"), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardTemplate {
    pub id: CardId,
    pub name: FxHashMap<String, String>,
    pub text: FxHashMap<String, String>,
    /// Turn points needed to play this card.
    pub cost: u32,
    /// Stake placed when played as a wager.
    pub bet_amount: Option<i64>,

    // === Creature stats ===
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub rate_points: i32,

    /// Copies of this card in the influence deck.
    pub count: Option<i32>,
    pub effects: Vec<EffectSpec>,

    // === Creature-only properties ===
    pub rp_limit: Option<i32>,
    pub magic_barrier: Option<i32>,
    pub vampirism: Option<i32>,
    pub miss_chance: Vec<u8>,
    pub stun_chance: Vec<u8>,
    pub thief: bool,
    pub dynamic_stats: Vec<DynamicStatThreshold>,
}

impl CardTemplate {
    /// Create a creature template with base stats.
    #[must_use]
    pub fn creature(
        id: impl Into<String>,
        health: i32,
        attack: i32,
        defense: i32,
        rate_points: i32,
    ) -> Self {
        Self {
            id: CardId::new(id),
            health,
            attack,
            defense,
            rate_points,
            ..Self::default()
        }
    }

    /// Create an influence (buff/wager) template with a cost.
    #[must_use]
    pub fn influence(id: impl Into<String>, cost: u32) -> Self {
        Self {
            id: CardId::new(id),
            cost,
            ..Self::default()
        }
    }

    // === Builders ===

    /// Add an effect descriptor.
    #[must_use]
    pub fn with_effect(mut self, op: &str, path: &str, value: i32) -> Self {
        self.effects.push(EffectSpec::new(op, path, value));
        self
    }

    /// Set the wager stake.
    #[must_use]
    pub fn with_bet(mut self, amount: i64) -> Self {
        self.bet_amount = Some(amount);
        self
    }

    /// Set the deck count.
    #[must_use]
    pub fn with_count(mut self, count: i32) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the localized display name for a language.
    #[must_use]
    pub fn with_name(mut self, lang: &str, name: &str) -> Self {
        self.name.insert(lang.to_string(), name.to_string());
        self
    }

    #[must_use]
    pub fn with_rp_limit(mut self, limit: i32) -> Self {
        self.rp_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_magic_barrier(mut self, charges: i32) -> Self {
        self.magic_barrier = Some(charges);
        self
    }

    #[must_use]
    pub fn with_vampirism(mut self, amount: i32) -> Self {
        self.vampirism = Some(amount);
        self
    }

    #[must_use]
    pub fn with_miss_chance(mut self, faces: &[u8]) -> Self {
        self.miss_chance = faces.to_vec();
        self
    }

    #[must_use]
    pub fn with_stun_chance(mut self, faces: &[u8]) -> Self {
        self.stun_chance = faces.to_vec();
        self
    }

    #[must_use]
    pub fn with_thief(mut self) -> Self {
        self.thief = true;
        self
    }

    /// Add a dynamic stat threshold.
    #[must_use]
    pub fn with_dynamic_stat(mut self, threshold_hp: i32, effects: Vec<EffectSpec>) -> Self {
        self.dynamic_stats.push(DynamicStatThreshold {
            threshold_hp,
            effects,
        });
        self
    }

    // === Accessors ===

    /// Copies of this card in a built deck. Missing or non-positive counts mean 1.
    #[must_use]
    pub fn deck_count(&self) -> usize {
        match self.count {
            Some(n) if n > 0 => n as usize,
            _ => 1,
        }
    }

    /// Stake placed when played as a wager (0 when the card has none).
    #[must_use]
    pub fn bet(&self) -> i64 {
        self.bet_amount.unwrap_or(0)
    }

    /// Sum of all effect values targeting `path`, for card faces and summaries.
    #[must_use]
    pub fn stat_change(&self, path: &str) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.path.as_deref() == Some(path))
            .filter_map(|e| e.value)
            .sum()
    }
}
