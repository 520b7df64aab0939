//! Deterministic elemental combat rules.
//!
//! `combat-core` defines the canonical rules (spell resolution, value
//! calculation, effect application, turns and NPC behaviour) and exposes pure
//! APIs reused by the runtime and offline tools. All match mutation flows
//! through [`engine::CombatEngine`]; master data is reached through the
//! oracle traits in [`env`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
mod testing;

pub use action::{Action, CastRequest, cast_ability, cast_element, cast_spell};
pub use ai::{AiAction, AiCondition, AiDecision, AiRule, AiRuleError, AiRuleSet, TargetSelector};
pub use combat::{
    CastReport, CastSource, CastWarning, CastingMode, EffectOutcome, ResolutionStep,
    ResolvedSpell, resolve_spell,
};
pub use config::CombatConfig;
pub use engine::{
    ActionOutcome, CombatEngine, CombatPolicies, CreateMatchRequest, NpcMove, NpcMoveKind,
    TurnReport, create_match,
};
pub use env::{
    CatalogSnapshot, CharacterTemplate, ConfigOracle, Deck, Effect, EffectKind, EffectOracle,
    EnemyTemplate, Env, GameEnv, MatchupOracle, NpcAbility, OracleError, Recipe, RecipeOracle,
    RosterOracle, Spell, SpellEffect, SpellOracle, Stage, TargetType,
};
pub use error::{CombatError, ErrorSeverity, GameError, Missing, ResourceShortfall, Result};
pub use state::{
    AbilityId, CharacterId, CombatMatch, Combatant, CombatantId, EffectId, ElementId, EnemyId,
    Mastery, MatchId, MatchStatus, MatchType, PlayerId, RuleFlags, SpellId, StageId, Team,
};
