//! Cast orchestration: preparation, commit, value calculation and application.

use crate::combat::{
    CastReport, CastTotals, CastWarning, CastingMode, ResolutionStep, resolve_spell,
    talent_bonus,
};
use crate::engine::CombatPolicies;
use crate::env::GameEnv;
use crate::error::{CombatError, Missing, Result};
use crate::state::{AbilityId, CombatMatch, CombatantId, ElementId, Mastery, SpellId};

use super::apply::apply_effects;
use super::{CastProfile, prepare_cast};

/// Caster, target and mode shared by every cast entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastRequest {
    pub caster: CombatantId,
    pub target: CombatantId,
    pub mode: CastingMode,
}

/// Casts an authored spell by id.
///
/// # Errors
///
/// `NotFound` for unknown spells, plus every preparation error.
pub fn cast_spell(
    combat: &mut CombatMatch,
    env: &GameEnv<'_>,
    policies: &CombatPolicies,
    request: CastRequest,
    spell: SpellId,
) -> Result<CastReport> {
    let spell = env
        .spells()?
        .spell(spell)
        .ok_or(CombatError::NotFound(Missing::Spell(spell)))?;
    execute(combat, env, policies, request, spell.into(), None)
}

/// Casts whatever spell the resolver picks for `(element, mastery)`.
///
/// # Errors
///
/// `SpellNotFound` when the fallback chain is exhausted, plus every
/// preparation error.
pub fn cast_element(
    combat: &mut CombatMatch,
    env: &GameEnv<'_>,
    policies: &CombatPolicies,
    request: CastRequest,
    element: ElementId,
    mastery: Mastery,
) -> Result<CastReport> {
    let caster_element = combat.require(request.caster)?.element;
    let resolved = resolve_spell(
        env.spells()?,
        env.recipes()?,
        env.matchups()?,
        element,
        mastery,
        caster_element,
    )?;
    execute(
        combat,
        env,
        policies,
        request,
        resolved.spell.into(),
        Some(resolved.step),
    )
}

/// Casts an NPC ability. Abilities never spend charges.
pub fn cast_ability(
    combat: &mut CombatMatch,
    env: &GameEnv<'_>,
    policies: &CombatPolicies,
    request: CastRequest,
    ability: AbilityId,
) -> Result<CastReport> {
    let ability = env
        .roster()?
        .ability(ability)
        .ok_or(CombatError::NotFound(Missing::Ability(ability)))?;
    execute(combat, env, policies, request, ability.into(), None)
}

fn execute(
    combat: &mut CombatMatch,
    env: &GameEnv<'_>,
    policies: &CombatPolicies,
    request: CastRequest,
    profile: CastProfile,
    resolution: Option<ResolutionStep>,
) -> Result<CastReport> {
    let prepared = prepare_cast(
        combat,
        env,
        policies.casting.as_ref(),
        request.caster,
        request.target,
        profile,
        request.mode,
    )?;
    prepared.commit(combat)?;

    let mut report = CastReport {
        caster: request.caster,
        source: prepared.profile.source,
        element: prepared.profile.element,
        resolution,
        mode: request.mode,
        ap_spent: prepared.adjustment.ap_cost,
        mp_spent: prepared.adjustment.mp_cost,
        charge_consumed: prepared.charge,
        outcomes: Vec::new(),
        warnings: Vec::new(),
        totals: CastTotals::default(),
    };

    let talent = talent_bonus(
        combat.require(request.caster)?,
        prepared.profile.element,
        env.recipes()?,
        env.config()?.talent_divisor(),
    );
    if talent.provisional {
        report.warn(CastWarning::ProvisionalTalentBonus {
            element: prepared.profile.element,
            ingredients: talent.ingredients,
        });
    }

    apply_effects(
        combat,
        env,
        policies.status.as_ref(),
        &prepared,
        &talent,
        &mut report,
    )?;

    tracing::debug!(
        target: "combat::cast",
        caster = request.caster.0,
        source = ?report.source,
        damage = report.totals.damage,
        healing = report.totals.healing,
        warnings = report.warnings.len(),
        "cast resolved"
    );
    Ok(report)
}
