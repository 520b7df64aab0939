//! Character, enemy and stage loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::{CharacterTemplate, EnemyTemplate, Stage};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Templates consulted at match creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterCatalog {
    #[serde(default)]
    pub characters: Vec<CharacterTemplate>,
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<RosterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses the roster and checks that every stage lists known enemies.
    pub fn parse(content: &str) -> LoadResult<RosterCatalog> {
        let roster: RosterCatalog = parse_ron(content, "roster")?;

        for character in &roster.characters {
            if character.level == 0 || character.base_hp <= 0 {
                anyhow::bail!(
                    "Character {} ({}) needs level >= 1 and positive base HP",
                    character.id,
                    character.name
                );
            }
        }

        let enemies: BTreeSet<_> = roster.enemies.iter().map(|e| e.id).collect();
        for stage in &roster.stages {
            if stage.enemies.is_empty() {
                anyhow::bail!("Stage {} ({}) has no enemies", stage.id, stage.name);
            }
            if let Some(missing) = stage.enemies.iter().find(|e| !enemies.contains(e)) {
                anyhow::bail!("Stage {} references unknown enemy {}", stage.id, missing);
            }
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ElementId, PlayerId};

    const ROSTER: &str = r#"(
        characters: [(id: 1, owner: 7, name: "Ember", element: 1, level: 2, base_hp: 90, base_mp: 25, initiative: 12, talents: {1: 10})],
        enemies: [(id: 1, name: "Slime", element: 2, level: 1, base_hp: 30, base_mp: 0, initiative: 3, abilities: [1])],
        stages: [(id: 1, name: "Marsh", enemies: [1, 1])],
    )"#;

    #[test]
    fn parses_templates() {
        let roster = RosterLoader::parse(ROSTER).expect("roster");
        let ember = &roster.characters[0];
        assert_eq!(ember.owner, PlayerId(7));
        assert_eq!(ember.talents.get(&ElementId(1)), Some(&10));
        assert_eq!(roster.stages[0].enemies.len(), 2);
    }

    #[test]
    fn stage_with_unknown_enemy_is_rejected() {
        let content = ROSTER.replace("enemies: [1, 1]", "enemies: [1, 9]");
        let err = RosterLoader::parse(&content).expect_err("unknown enemy");
        assert!(err.to_string().contains("unknown enemy"));
    }
}
