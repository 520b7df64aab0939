//! Shared fixtures for unit tests.

use chrono::{TimeZone, Utc};

use crate::ai::{AiAction, AiCondition, AiRule, AiRuleSet, TargetSelector};
use crate::config::CombatConfig;
use crate::env::{
    CatalogSnapshot, CharacterTemplate, CleanseFilter, Effect, EffectFlags, EffectKind,
    EnemyTemplate, NpcAbility, Recipe, Spell, SpellEffect, Stage, TargetType,
};
use crate::state::{
    AbilityId, CharacterId, CombatMatch, Combatant, CombatantId, EffectId, ElementId, EnemyId,
    Mastery, MatchId, MatchType, PlayerId, ResourceKind, SpellId, StageId,
};

pub const FIRE: ElementId = ElementId(1);
pub const WATER: ElementId = ElementId(2);
pub const EARTH: ElementId = ElementId(3);
pub const STEAM: ElementId = ElementId(10);

pub const DAMAGE: EffectId = EffectId(1);
pub const TRUE_DAMAGE: EffectId = EffectId(2);
pub const SHIELD: EffectId = EffectId(3);
pub const HEAL: EffectId = EffectId(4);
pub const RESTORE_MP: EffectId = EffectId(5);
pub const CLEANSE: EffectId = EffectId(6);
pub const BURN: EffectId = EffectId(7);
pub const STUN: EffectId = EffectId(8);
pub const HASTE: EffectId = EffectId(9);
pub const BLUR: EffectId = EffectId(10);
pub const WEAKEN: EffectId = EffectId(11);

pub const FIREBALL: SpellId = SpellId(1);
pub const WARD: SpellId = SpellId(2);
pub const STEAM_BURST: SpellId = SpellId(3);
pub const MEND: SpellId = SpellId(4);
pub const RAIN: SpellId = SpellId(5);
pub const PIERCE: SpellId = SpellId(6);

pub const CLAW: AbilityId = AbilityId(1);
pub const HEX: AbilityId = AbilityId(2);

pub const OWNER: PlayerId = PlayerId(1);
pub const HERO: CharacterId = CharacterId(1);
pub const GOBLIN: EnemyId = EnemyId(1);
pub const SHAMAN: EnemyId = EnemyId(2);
pub const CAVE: StageId = StageId(1);

fn spell(id: SpellId, name: &str, element: ElementId, mastery: u8, ap: i32, target: TargetType, effects: Vec<SpellEffect>) -> Spell {
    Spell {
        id,
        name: name.into(),
        element,
        mastery: Mastery(mastery),
        ap_cost: ap,
        mp_cost: 0,
        target,
        effects,
    }
}

pub fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new(CombatConfig::default())
        .with_effect(Effect::new(DAMAGE, "Damage", EffectKind::Damage))
        .with_effect(Effect::new(TRUE_DAMAGE, "True Damage", EffectKind::TrueDamage))
        .with_effect(Effect::new(SHIELD, "Barrier", EffectKind::Shield))
        .with_effect(Effect::new(HEAL, "Heal", EffectKind::Heal))
        .with_effect(Effect::new(RESTORE_MP, "Focus", EffectKind::Resource).with_resource(ResourceKind::Mp))
        .with_effect(Effect::new(CLEANSE, "Purify", EffectKind::Utility).with_cleanse(CleanseFilter::AllDebuffs))
        .with_effect(Effect::new(BURN, "Burn", EffectKind::DebuffDOT))
        .with_effect(Effect::new(STUN, "Stun", EffectKind::DebuffHardCC))
        .with_effect(Effect::new(HASTE, "Haste", EffectKind::SynergyBuff))
        .with_effect(Effect::new(BLUR, "Blur", EffectKind::Buff).with_flags(EffectFlags::EVASION))
        .with_effect(Effect::new(WEAKEN, "Weaken", EffectKind::Debuff))
        .with_spell(spell(FIREBALL, "Fireball", FIRE, 1, 2, TargetType::Enemy, vec![SpellEffect::new(DAMAGE, 10.0)]))
        .with_spell(spell(WARD, "Ward", WATER, 1, 1, TargetType::SelfOnly, vec![SpellEffect::new(SHIELD, 8.0).lasting(2)]))
        .with_spell(spell(
            STEAM_BURST,
            "Steam Burst",
            STEAM,
            1,
            2,
            TargetType::Enemy,
            vec![SpellEffect::new(DAMAGE, 12.0), SpellEffect::new(BURN, 3.0).lasting(2)],
        ))
        .with_spell(spell(MEND, "Mend", WATER, 2, 1, TargetType::Ally, vec![SpellEffect::new(HEAL, 15.0)]))
        .with_spell(spell(RAIN, "Rain", WATER, 3, 3, TargetType::AllEnemies, vec![SpellEffect::new(DAMAGE, 5.0)]))
        .with_spell(spell(PIERCE, "Pierce", EARTH, 1, 1, TargetType::Enemy, vec![SpellEffect::new(TRUE_DAMAGE, 7.0)]))
        .with_recipe(Recipe::new(STEAM, [(FIRE, 1), (WATER, 1)]))
        .with_matchup(FIRE, EARTH, 2.0)
        .with_matchup(WATER, FIRE, 1.5)
        .with_character(CharacterTemplate {
            id: HERO,
            owner: OWNER,
            name: "Hero".into(),
            element: FIRE,
            level: 1,
            base_hp: 100,
            base_mp: 30,
            initiative: 10,
            talents: Default::default(),
        })
        .with_enemy(enemy(GOBLIN, "Goblin", ElementId::NONE, 40, vec![CLAW]))
        .with_enemy(enemy(SHAMAN, "Shaman", EARTH, 30, vec![HEX]))
        .with_stage(Stage {
            id: CAVE,
            name: "Cave".into(),
            enemies: vec![GOBLIN, SHAMAN],
        })
        .with_ability(NpcAbility {
            id: CLAW,
            name: "Claw".into(),
            element: ElementId::NONE,
            ap_cost: 1,
            mp_cost: 0,
            target: TargetType::Enemy,
            effects: vec![SpellEffect::new(DAMAGE, 6.0)],
        })
        .with_ability(NpcAbility {
            id: HEX,
            name: "Hex".into(),
            element: EARTH,
            ap_cost: 2,
            mp_cost: 0,
            target: TargetType::Enemy,
            effects: vec![SpellEffect::new(WEAKEN, 1.0).lasting(2)],
        })
        .with_rules(GOBLIN, always_use(GOBLIN, CLAW))
        .with_rules(SHAMAN, always_use(SHAMAN, HEX))
}

fn enemy(id: EnemyId, name: &str, element: ElementId, hp: i32, abilities: Vec<AbilityId>) -> EnemyTemplate {
    EnemyTemplate {
        id,
        name: name.into(),
        element,
        level: 1,
        base_hp: hp,
        base_mp: 0,
        initiative: 1,
        talents: Default::default(),
        abilities,
    }
}

pub fn always_use(enemy: EnemyId, ability: AbilityId) -> AiRuleSet {
    AiRuleSet::new(vec![AiRule {
        enemy,
        priority: 1,
        condition: AiCondition::Always,
        value: 0.0,
        action: AiAction::UseAbility,
        target: TargetSelector::Player,
        ability: Some(ability),
    }])
    .expect("fixture rules are valid")
}

pub fn build(enemies: &[EnemyId]) -> CombatMatch {
    let catalog = catalog();
    let config = &catalog.config;
    let mut combatants = vec![Combatant::from_character(
        CombatantId(0),
        &catalog.characters[&HERO],
        config,
    )];
    for (index, enemy) in enemies.iter().enumerate() {
        combatants.push(Combatant::from_enemy(
            CombatantId(index as u32 + 1),
            &catalog.enemies[enemy],
            config,
        ));
    }
    CombatMatch::new(MatchId(1), OWNER, MatchType::Training, combatants, now())
}

/// Hero (#0) against one goblin (#1).
pub fn duel() -> CombatMatch {
    build(&[GOBLIN])
}

/// Hero (#0) against a goblin (#1) and a shaman (#2).
pub fn skirmish() -> CombatMatch {
    build(&[GOBLIN, SHAMAN])
}

pub fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).single().expect("valid timestamp")
}
