//! Content compiled into the binary.

use combat_core::env::CatalogSnapshot;

use crate::loaders::factory::{Content, assemble};
use crate::loaders::{
    AbilityLoader, ConfigLoader, EffectLoader, ElementLoader, LoadResult, RosterLoader,
    RulesLoader, SpellLoader,
};

const CONFIG: &str = include_str!("../../data/config.toml");
const EFFECTS: &str = include_str!("../../data/effects.ron");
const SPELLS: &str = include_str!("../../data/spells.ron");
const ELEMENTS: &str = include_str!("../../data/elements.ron");
const ROSTER: &str = include_str!("../../data/roster.ron");
const ABILITIES: &str = include_str!("../../data/abilities.ron");
const AI_RULES: &str = include_str!("../../data/ai_rules.ron");

/// Parses the bundled data set.
pub fn bundled_catalog() -> LoadResult<CatalogSnapshot> {
    assemble(Content {
        config: ConfigLoader::parse(CONFIG)?,
        effects: EffectLoader::parse(EFFECTS)?,
        spells: SpellLoader::parse(SPELLS)?,
        elements: ElementLoader::parse(ELEMENTS)?,
        roster: RosterLoader::parse(ROSTER)?,
        abilities: AbilityLoader::parse(ABILITIES)?,
        rules: RulesLoader::parse(AI_RULES)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::env::{MatchupOracle, RecipeOracle, RosterOracle, SpellOracle};
    use combat_core::{CharacterId, ElementId, EnemyId, Mastery, StageId};

    #[test]
    fn bundled_content_is_consistent() {
        let catalog = bundled_catalog().expect("bundled content");

        assert!(catalog.character(CharacterId(1)).is_some());
        let stage = catalog.stage(StageId(1)).expect("stage");
        for enemy in stage.enemies {
            assert!(catalog.rules(enemy).is_some(), "enemy {enemy} has rules");
        }
        assert!(catalog.spell_for(ElementId(1), Mastery(1)).is_some());
        assert!(catalog.recipe(ElementId(10)).is_some());
        assert_eq!(catalog.modifier(ElementId(2), ElementId(1)), Some(1.5));
    }

    #[test]
    fn every_enemy_ability_decodes() {
        let catalog = bundled_catalog().expect("bundled content");
        for enemy in catalog.enemies.values() {
            for ability in &enemy.abilities {
                let ability = catalog.ability(*ability).expect("ability");
                assert!(!ability.effects.is_empty());
            }
        }
        assert!(catalog.enemy(EnemyId(1)).is_some());
    }
}
