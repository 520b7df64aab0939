//! Content loaders for reading combat data from files.
//!
//! Every loader exposes `load(path)` for files on disk and `parse(content)`
//! for strings, which the bundled data goes through.

pub mod abilities;
pub mod bundled;
pub mod config;
pub mod effects;
pub mod elements;
pub mod factory;
pub mod roster;
pub mod rules;
pub mod spells;

pub use abilities::{AbilityLoader, AbilityRecord};
pub use bundled::bundled_catalog;
pub use config::ConfigLoader;
pub use effects::EffectLoader;
pub use elements::{ElementLoader, ElementTables};
pub use factory::ContentFactory;
pub use roster::{RosterCatalog, RosterLoader};
pub use rules::RulesLoader;
pub use spells::SpellLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Deserializes RON content, naming `what` in the error.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
