//! Spell resolution and effect value math.
//!
//! Everything here is pure: functions read oracles and combatants and return
//! numbers or records. Mutation happens in [`crate::action`].
mod matchup;
mod modifier;
mod resolver;
mod result;
mod value;

pub use matchup::elemental_modifier;
pub use modifier::{
    CastingMode, CastingModePolicy, CombinedModifier, ModeAdjustment, NeutralStatusModifier,
    ScaledCastingModes, StatusModifier, combine_modifiers,
};
pub use resolver::{
    ResolutionStep, ResolvedSpell, caster_affinity_pick, insider_element, majority_element,
    resolve_spell, tournament_winner,
};
pub use result::{CastReport, CastSource, CastTotals, CastWarning, EffectOutcome};
pub use value::{TalentBonus, initial_value, mastery_multiplier, talent_bonus};
