//! Data-driven master data and loaders.
//!
//! This crate houses the bundled combat content and provides loaders for
//! RON/TOML data files:
//! - Effect catalog (RON)
//! - Spell catalog (RON)
//! - Element recipes and matchup table (RON)
//! - Characters, enemies and stages (RON)
//! - NPC abilities (RON records carrying JSON effect lists)
//! - AI rules (RON)
//! - Combat configuration (TOML)
//!
//! Content is consumed through the combat-core oracles and never appears in
//! match state except as copied template values.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, AbilityRecord, ConfigLoader, ContentFactory, EffectLoader, ElementLoader,
    ElementTables, LoadResult, RosterCatalog, RosterLoader, RulesLoader, SpellLoader,
    bundled_catalog,
};
