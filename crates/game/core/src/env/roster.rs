use std::collections::BTreeMap;

use crate::ai::AiRuleSet;
use crate::state::{AbilityId, CharacterId, ElementId, EnemyId, PlayerId, StageId};

use super::{SpellEffect, TargetType};

/// Templates consulted when a match is created, plus NPC behaviour.
pub trait RosterOracle: Send + Sync {
    fn character(&self, id: CharacterId) -> Option<CharacterTemplate>;

    fn enemy(&self, id: EnemyId) -> Option<EnemyTemplate>;

    fn stage(&self, id: StageId) -> Option<Stage>;

    fn ability(&self, id: AbilityId) -> Option<NpcAbility>;

    /// Validated rule set driving an enemy's turns.
    fn rules(&self, enemy: EnemyId) -> Option<AiRuleSet>;
}

/// Player-owned character as stored by the character service.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub id: CharacterId,
    pub owner: PlayerId,
    pub name: String,
    pub element: ElementId,
    pub level: u32,
    pub base_hp: i32,
    pub base_mp: i32,
    pub initiative: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub talents: BTreeMap<ElementId, i32>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub element: ElementId,
    pub level: u32,
    pub base_hp: i32,
    pub base_mp: i32,
    pub initiative: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub talents: BTreeMap<ElementId, i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

/// Story stage with a fixed enemy lineup, in turn order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    pub enemies: Vec<EnemyId>,
}

/// Composite-element cards brought into a match. Each card becomes one charge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    pub cards: Vec<ElementId>,
}

/// NPC ability. Shares [`SpellEffect`] with player spells so both go through
/// the same application engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcAbility {
    pub id: AbilityId,
    pub name: String,
    pub element: ElementId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ap_cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: i32,
    pub target: TargetType,
    pub effects: Vec<SpellEffect>,
}
