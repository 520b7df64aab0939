//! Effect catalog loader.

use std::path::Path;

use combat_core::Effect;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<Effect>,
}

/// Loader for the effect catalog from RON files.
pub struct EffectLoader;

impl EffectLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Effect>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Effect>> {
        let catalog: EffectCatalog = parse_ron(content, "effect catalog")?;
        Ok(catalog.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::env::{CleanseFilter, EffectFlags};
    use combat_core::{EffectId, EffectKind};

    #[test]
    fn parses_metadata() {
        let effects = EffectLoader::parse(
            r#"(effects: [
                (id: 1, name: "Strike", kind: Damage),
                (id: 2, name: "Mirage", kind: Buff, flags: "EVASION"),
                (id: 3, name: "Purify", kind: Utility, cleanse: Some(Kind(DebuffDOT))),
            ])"#,
        )
        .expect("effects");

        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0].id, EffectId(1));
        assert!(effects[1].flags.contains(EffectFlags::EVASION));
        assert_eq!(effects[2].cleanse, Some(CleanseFilter::Kind(EffectKind::DebuffDOT)));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = EffectLoader::parse(r#"(effects: [(id: 1, name: "X", kind: Explode)])"#)
            .expect_err("unknown kind");
        assert!(err.to_string().contains("effect catalog"));
    }
}
