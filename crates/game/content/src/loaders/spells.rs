//! Spell catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::Spell;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<Spell>,
}

/// Loader for the spell catalog from RON files.
pub struct SpellLoader;

impl SpellLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Spell>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses the catalog and rejects duplicate ids and negative costs.
    pub fn parse(content: &str) -> LoadResult<Vec<Spell>> {
        let catalog: SpellCatalog = parse_ron(content, "spell catalog")?;

        let mut seen = BTreeSet::new();
        for spell in &catalog.spells {
            if !seen.insert(spell.id) {
                anyhow::bail!("Duplicate spell id {}", spell.id);
            }
            if spell.ap_cost < 0 || spell.mp_cost < 0 {
                anyhow::bail!("Spell {} ({}) has a negative cost", spell.id, spell.name);
            }
        }
        Ok(catalog.spells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::env::ConditionKind;
    use combat_core::{Mastery, TargetType};

    #[test]
    fn parses_effect_lists_and_conditions() {
        let spells = SpellLoader::parse(
            r#"(spells: [(
                id: 7,
                name: "Execute",
                element: 1,
                mastery: 2,
                ap_cost: 3,
                mp_cost: 0,
                target: Enemy,
                effects: [
                    (effect: 1, base_value: 10.0),
                    (effect: 1, base_value: 15.0, condition: Some((kind: TargetHpBelow, detail: "30"))),
                ],
            )])"#,
        )
        .expect("spells");

        let spell = &spells[0];
        assert_eq!(spell.mastery, Mastery(2));
        assert_eq!(spell.target, TargetType::Enemy);
        assert_eq!(spell.effects[0].duration, 0);
        assert_eq!(
            spell.effects[1].condition.as_ref().map(|c| c.kind),
            Some(ConditionKind::TargetHpBelow)
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let entry = r#"(id: 1, name: "A", element: 1, mastery: 1, ap_cost: 1, mp_cost: 0, target: Enemy, effects: [])"#;
        let content = format!("(spells: [{entry}, {entry}])");
        assert!(SpellLoader::parse(&content).is_err());
    }
}
