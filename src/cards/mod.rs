//! Card system: templates, catalog, and per-battle creatures.
//!
//! ## Key Types
//!
//! - `CardId`: Stable string identifier, unique across the catalog
//! - `CardTemplate`: Immutable card data (creature stats or influence effects)
//! - `CardCatalog`: Template lookup, partitioned into creatures and influence cards
//! - `CreatureInstance`: Mutable creature state for one battle

pub mod catalog;
pub mod creature;
pub mod template;

pub use catalog::{CardCatalog, CardRole, CatalogError};
pub use creature::{CreatureInstance, FaceSet, StatBonus};
pub use template::{CardId, CardTemplate, DynamicStatThreshold, EffectSpec};
