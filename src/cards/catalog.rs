//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every template for the process lifetime,
//! partitioned into creatures and influence cards. Ids are unique across
//! both partitions. Registration order is kept so that a seeded match
//! shuffles the same sequence every run.

use rustc_hash::FxHashMap;

use super::template::{CardId, CardTemplate};

/// Catalog construction failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("card id '{0}' registered twice")]
    DuplicateId(CardId),
}

/// The two roles a template can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardRole {
    Creature,
    Influence,
}

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use wager_arena::cards::{CardCatalog, CardTemplate};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register_creature(CardTemplate::creature("orc", 20, 8, 1, 8)).unwrap();
/// catalog.register_influence(CardTemplate::influence("bet", 1).with_bet(300).with_count(3)).unwrap();
///
/// assert_eq!(catalog.get("orc").unwrap().attack, 8);
/// assert_eq!(catalog.influence_deck().len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, (CardRole, CardTemplate)>,
    creatures: Vec<CardId>,
    influence: Vec<CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-loaded creature and influence lists.
    pub fn from_parts(
        creatures: impl IntoIterator<Item = CardTemplate>,
        influence: impl IntoIterator<Item = CardTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in creatures {
            catalog.register_creature(card)?;
        }
        for card in influence {
            catalog.register_influence(card)?;
        }
        Ok(catalog)
    }

    /// Register a creature template.
    pub fn register_creature(&mut self, card: CardTemplate) -> Result<(), CatalogError> {
        self.register(CardRole::Creature, card)
    }

    /// Register an influence (buff/wager) template.
    pub fn register_influence(&mut self, card: CardTemplate) -> Result<(), CatalogError> {
        self.register(CardRole::Influence, card)
    }

    fn register(&mut self, role: CardRole, card: CardTemplate) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        let id = card.id.clone();
        match role {
            CardRole::Creature => self.creatures.push(id.clone()),
            CardRole::Influence => self.influence.push(id.clone()),
        }
        self.cards.insert(id, (role, card));
        Ok(())
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardTemplate> {
        self.cards.get(id).map(|(_, card)| card)
    }

    /// Which partition a card belongs to.
    #[must_use]
    pub fn role(&self, id: &str) -> Option<CardRole> {
        self.cards.get(id).map(|(role, _)| *role)
    }

    /// Creature ids in registration order.
    #[must_use]
    pub fn creature_ids(&self) -> &[CardId] {
        &self.creatures
    }

    /// Influence card ids in registration order.
    #[must_use]
    pub fn influence_ids(&self) -> &[CardId] {
        &self.influence
    }

    /// Iterate over creature templates in registration order.
    pub fn creatures(&self) -> impl Iterator<Item = &CardTemplate> {
        self.creatures.iter().filter_map(|id| self.get(id.as_str()))
    }

    /// Unshuffled influence deck: every influence card repeated `deck_count()` times.
    #[must_use]
    pub fn influence_deck(&self) -> Vec<CardId> {
        self.influence
            .iter()
            .filter_map(|id| self.get(id.as_str()))
            .flat_map(|card| std::iter::repeat(card.id.clone()).take(card.deck_count()))
            .collect()
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
