//! Content factory for building the catalog snapshot from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use combat_core::env::CatalogSnapshot;
use combat_core::{AiRuleSet, CombatConfig, Effect, EnemyId, NpcAbility, Spell};

use crate::loaders::{
    AbilityLoader, ConfigLoader, EffectLoader, ElementLoader, ElementTables, LoadResult,
    RosterCatalog, RosterLoader, RulesLoader, SpellLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── effects.ron
/// ├── spells.ron
/// ├── elements.ron
/// ├── roster.ron
/// ├── abilities.ron
/// └── ai_rules.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the effect catalog from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<Vec<Effect>> {
        EffectLoader::load(&self.data_dir.join("effects.ron"))
    }

    /// Load the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<Vec<Spell>> {
        SpellLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load recipes and matchups from `elements.ron`.
    pub fn load_elements(&self) -> LoadResult<ElementTables> {
        ElementLoader::load(&self.data_dir.join("elements.ron"))
    }

    /// Load characters, enemies and stages from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<RosterCatalog> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Load NPC abilities from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<NpcAbility>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load AI rules from `ai_rules.ron`.
    pub fn load_rules(&self) -> LoadResult<BTreeMap<EnemyId, AiRuleSet>> {
        RulesLoader::load(&self.data_dir.join("ai_rules.ron"))
    }

    /// Loads every file and assembles a [`CatalogSnapshot`].
    pub fn build_catalog(&self) -> LoadResult<CatalogSnapshot> {
        assemble(Content {
            config: self.load_config()?,
            effects: self.load_effects()?,
            spells: self.load_spells()?,
            elements: self.load_elements()?,
            roster: self.load_roster()?,
            abilities: self.load_abilities()?,
            rules: self.load_rules()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Parsed content files, before cross-reference checks.
pub(crate) struct Content {
    pub config: CombatConfig,
    pub effects: Vec<Effect>,
    pub spells: Vec<Spell>,
    pub elements: ElementTables,
    pub roster: RosterCatalog,
    pub abilities: Vec<NpcAbility>,
    pub rules: BTreeMap<EnemyId, AiRuleSet>,
}

/// Builds the snapshot, rejecting enemies or rules that name unknown
/// abilities and rules for unknown enemies.
pub(crate) fn assemble(content: Content) -> LoadResult<CatalogSnapshot> {
    let mut catalog = CatalogSnapshot::new(content.config);

    for effect in content.effects {
        catalog = catalog.with_effect(effect);
    }
    for spell in content.spells {
        catalog = catalog.with_spell(spell);
    }
    for recipe in content.elements.recipes {
        catalog = catalog.with_recipe(recipe);
    }
    for matchup in content.elements.matchups {
        catalog = catalog.with_matchup(matchup.attacker, matchup.defender, matchup.multiplier);
    }
    for ability in content.abilities {
        catalog = catalog.with_ability(ability);
    }
    for character in content.roster.characters {
        catalog = catalog.with_character(character);
    }
    for stage in content.roster.stages {
        catalog = catalog.with_stage(stage);
    }
    for enemy in content.roster.enemies {
        if let Some(missing) = enemy
            .abilities
            .iter()
            .find(|a| !catalog.abilities.contains_key(a))
        {
            anyhow::bail!("Enemy {} ({}) references unknown ability {}", enemy.id, enemy.name, missing);
        }
        catalog = catalog.with_enemy(enemy);
    }
    for (enemy, rules) in content.rules {
        if !catalog.enemies.contains_key(&enemy) {
            anyhow::bail!("AI rules reference unknown enemy {}", enemy);
        }
        if let Some(missing) = rules
            .iter()
            .filter_map(|r| r.ability)
            .find(|a| !catalog.abilities.contains_key(a))
        {
            anyhow::bail!("AI rules of enemy {} reference unknown ability {}", enemy, missing);
        }
        catalog = catalog.with_rules(enemy, rules);
    }

    Ok(catalog)
}
