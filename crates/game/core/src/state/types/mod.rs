mod common;

pub use common::{
    AbilityId, CharacterId, CombatantId, EffectId, ElementId, EnemyId, Mastery, MatchId,
    PlayerId, ResourceKind, SpellId, StageId,
};
