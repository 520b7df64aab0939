//! In-memory catalog implementing every oracle.
//!
//! Content loaders fill a [`CatalogSnapshot`] once at startup; the runtime
//! shares it behind an `Arc` and hands a borrowed [`GameEnv`] to each worker.

use std::collections::BTreeMap;

use crate::ai::AiRuleSet;
use crate::config::CombatConfig;
use crate::state::{AbilityId, CharacterId, EffectId, ElementId, EnemyId, Mastery, SpellId, StageId};

use super::{
    CharacterTemplate, ConfigKey, ConfigOracle, Effect, EffectOracle, EnemyTemplate, Env,
    GameEnv, MatchupOracle, NpcAbility, Recipe, RecipeOracle, RosterOracle, Spell, SpellOracle,
    Stage,
};

#[derive(Clone, Debug, Default)]
pub struct CatalogSnapshot {
    pub spells: BTreeMap<SpellId, Spell>,
    pub effects: BTreeMap<EffectId, Effect>,
    pub recipes: BTreeMap<ElementId, Recipe>,
    pub matchups: BTreeMap<(ElementId, ElementId), f64>,
    pub characters: BTreeMap<CharacterId, CharacterTemplate>,
    pub enemies: BTreeMap<EnemyId, EnemyTemplate>,
    pub stages: BTreeMap<StageId, Stage>,
    pub abilities: BTreeMap<AbilityId, NpcAbility>,
    pub rules: BTreeMap<EnemyId, AiRuleSet>,
    pub config: CombatConfig,
}

impl CatalogSnapshot {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spells.insert(spell.id, spell);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.insert(effect.id, effect);
        self
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.insert(recipe.output, recipe);
        self
    }

    pub fn with_matchup(mut self, attacker: ElementId, defender: ElementId, multiplier: f64) -> Self {
        self.matchups.insert((attacker, defender), multiplier);
        self
    }

    pub fn with_character(mut self, character: CharacterTemplate) -> Self {
        self.characters.insert(character.id, character);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyTemplate) -> Self {
        self.enemies.insert(enemy.id, enemy);
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.insert(stage.id, stage);
        self
    }

    pub fn with_ability(mut self, ability: NpcAbility) -> Self {
        self.abilities.insert(ability.id, ability);
        self
    }

    pub fn with_rules(mut self, enemy: EnemyId, rules: AiRuleSet) -> Self {
        self.rules.insert(enemy, rules);
        self
    }

    /// Borrows every oracle at once.
    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(self, self, self, self, self, self).into_game_env()
    }
}

impl SpellOracle for CatalogSnapshot {
    fn spell(&self, id: SpellId) -> Option<Spell> {
        self.spells.get(&id).cloned()
    }

    fn spell_for(&self, element: ElementId, mastery: Mastery) -> Option<Spell> {
        // Lowest id wins when several spells share a slot.
        self.spells
            .values()
            .find(|spell| spell.element == element && spell.mastery == mastery)
            .cloned()
    }
}

impl EffectOracle for CatalogSnapshot {
    fn effect(&self, id: EffectId) -> Option<Effect> {
        self.effects.get(&id).cloned()
    }
}

impl RecipeOracle for CatalogSnapshot {
    fn recipe(&self, output: ElementId) -> Option<Recipe> {
        self.recipes.get(&output).cloned()
    }
}

impl MatchupOracle for CatalogSnapshot {
    fn modifier(&self, attacker: ElementId, defender: ElementId) -> Option<f64> {
        self.matchups.get(&(attacker, defender)).copied()
    }
}

impl RosterOracle for CatalogSnapshot {
    fn character(&self, id: CharacterId) -> Option<CharacterTemplate> {
        self.characters.get(&id).cloned()
    }

    fn enemy(&self, id: EnemyId) -> Option<EnemyTemplate> {
        self.enemies.get(&id).cloned()
    }

    fn stage(&self, id: StageId) -> Option<Stage> {
        self.stages.get(&id).cloned()
    }

    fn ability(&self, id: AbilityId) -> Option<NpcAbility> {
        self.abilities.get(&id).cloned()
    }

    fn rules(&self, enemy: EnemyId) -> Option<AiRuleSet> {
        self.rules.get(&enemy).cloned()
    }
}

impl ConfigOracle for CatalogSnapshot {
    fn value(&self, key: ConfigKey) -> Option<f64> {
        self.config.value(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TargetType;

    fn spell(id: u32, element: u16, mastery: u8) -> Spell {
        Spell {
            id: SpellId(id),
            name: format!("spell-{id}"),
            element: ElementId(element),
            mastery: Mastery(mastery),
            ap_cost: 1,
            mp_cost: 0,
            target: TargetType::Enemy,
            effects: Vec::new(),
        }
    }

    #[test]
    fn spell_for_matches_element_and_mastery() {
        let catalog = CatalogSnapshot::default()
            .with_spell(spell(2, 1, 1))
            .with_spell(spell(1, 1, 2))
            .with_spell(spell(3, 1, 1));

        let found = catalog.spell_for(ElementId(1), Mastery(1)).map(|s| s.id);
        assert_eq!(found, Some(SpellId(2)));
        assert!(catalog.spell_for(ElementId(2), Mastery(1)).is_none());
    }

    #[test]
    fn env_exposes_every_oracle() {
        let catalog = CatalogSnapshot::default().with_matchup(ElementId(1), ElementId(2), 1.5);
        let env = catalog.env();

        assert_eq!(
            env.matchups().ok().and_then(|m| m.modifier(ElementId(1), ElementId(2))),
            Some(1.5)
        );
        assert!(env.config().is_ok());
        assert!(env.roster().is_ok());
    }
}
