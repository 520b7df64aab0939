//! Cast preparation.
//!
//! Validates a cast against the current match without touching it. Only a
//! fully validated [`PreparedCast`] can be committed, so a rejected cast never
//! deducts anything.

use crate::combat::{CastSource, CastingMode, CastingModePolicy, ModeAdjustment};
use crate::env::{GameEnv, NpcAbility, Spell, SpellEffect, TargetType};
use crate::error::{CombatError, ResourceShortfall, Result};
use crate::state::{CombatMatch, Combatant, CombatantId, ElementId, Mastery};

/// Castable view shared by player spells and NPC abilities.
#[derive(Clone, Debug, PartialEq)]
pub struct CastProfile {
    pub source: CastSource,
    pub name: String,
    pub element: ElementId,
    pub mastery: Mastery,
    pub ap_cost: i32,
    pub mp_cost: i32,
    pub target: TargetType,
    pub effects: Vec<SpellEffect>,
}

impl From<Spell> for CastProfile {
    fn from(spell: Spell) -> Self {
        Self {
            source: CastSource::Spell(spell.id),
            name: spell.name,
            element: spell.element,
            mastery: spell.mastery,
            ap_cost: spell.ap_cost,
            mp_cost: spell.mp_cost,
            target: spell.target,
            effects: spell.effects,
        }
    }
}

impl From<NpcAbility> for CastProfile {
    fn from(ability: NpcAbility) -> Self {
        Self {
            source: CastSource::Ability(ability.id),
            name: ability.name,
            element: ability.element,
            mastery: Mastery(1),
            ap_cost: ability.ap_cost,
            mp_cost: ability.mp_cost,
            target: ability.target,
            effects: ability.effects,
        }
    }
}

/// A cast that passed every check.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedCast {
    pub caster: CombatantId,
    /// Declared target, or every living member of the targeted team for
    /// area casts.
    pub targets: Vec<CombatantId>,
    pub profile: CastProfile,
    pub mode: CastingMode,
    pub adjustment: ModeAdjustment,
    /// Composite element whose charge the cast spends.
    pub charge: Option<ElementId>,
}

/// Validates a cast.
///
/// Checks run in a fixed order and the first failure wins:
/// match in progress, caster alive, target present and alive, target type,
/// AP, MP, composite charge. Costs are adjusted by the casting mode before
/// they are checked.
///
/// # Errors
///
/// - `MatchAlreadyEnded` for terminal matches
/// - `NotFound` for unknown caster or target
/// - `Validation` for defeated combatants or a disallowed target
/// - `ResourceInsufficient` for AP, MP or missing charges
pub fn prepare_cast(
    combat: &CombatMatch,
    env: &GameEnv<'_>,
    casting: &dyn CastingModePolicy,
    caster: CombatantId,
    target: CombatantId,
    profile: CastProfile,
    mode: CastingMode,
) -> Result<PreparedCast> {
    combat.ensure_in_progress()?;

    let caster_ref = combat.require(caster)?;
    if !caster_ref.is_alive() {
        return Err(CombatError::validation(format!(
            "caster {caster} is defeated"
        )));
    }

    let target_ref = combat.require(target)?;
    if !target_ref.is_alive() {
        return Err(CombatError::validation(format!(
            "target {target} is defeated"
        )));
    }

    check_target_type(profile.target, caster_ref, target_ref)?;

    let adjustment = casting.adjust(mode, profile.ap_cost, profile.mp_cost);
    if caster_ref.ap < adjustment.ap_cost {
        return Err(CombatError::insufficient(
            ResourceShortfall::Ap,
            adjustment.ap_cost,
            caster_ref.ap,
        ));
    }
    if caster_ref.mp < adjustment.mp_cost {
        return Err(CombatError::insufficient(
            ResourceShortfall::Mp,
            adjustment.mp_cost,
            caster_ref.mp,
        ));
    }

    let charge = match profile.source {
        CastSource::Spell(_) if !profile.element.is_none() => {
            let composite = env.recipes()?.recipe(profile.element).is_some();
            if composite && !caster_ref.has_charge(profile.element) {
                return Err(CombatError::insufficient(
                    ResourceShortfall::Charge(profile.element),
                    1,
                    0,
                ));
            }
            composite.then_some(profile.element)
        }
        _ => None,
    };

    let targets = if profile.target.is_area() {
        let team = if profile.target.is_hostile() {
            caster_ref.team().opponent()
        } else {
            caster_ref.team()
        };
        combat.living(team).map(|c| c.id).collect()
    } else {
        vec![target]
    };

    Ok(PreparedCast {
        caster,
        targets,
        profile,
        mode,
        adjustment,
        charge,
    })
}

fn check_target_type(target_type: TargetType, caster: &Combatant, target: &Combatant) -> Result<()> {
    let allowed = match target_type {
        TargetType::SelfOnly => caster.id == target.id,
        TargetType::Enemy | TargetType::AllEnemies => caster.team() != target.team(),
        TargetType::Ally | TargetType::AllAllies => caster.team() == target.team(),
    };
    if allowed {
        Ok(())
    } else {
        Err(CombatError::validation(format!(
            "{target_type} cast cannot target {} on the {} team",
            target.id,
            target.team()
        )))
    }
}

impl PreparedCast {
    /// Deducts AP and MP and consumes one charge.
    ///
    /// # Errors
    ///
    /// Returns `CombatError::System` if the caster vanished or the charge was
    /// spent between preparation and commit.
    pub fn commit(&self, combat: &mut CombatMatch) -> Result<()> {
        let caster = combat.require_mut(self.caster)?;
        if let Some(element) = self.charge
            && !caster.consume_charge(element)
        {
            return Err(CombatError::system(format!(
                "charge of element {element} vanished before commit"
            )));
        }
        caster.ap -= self.adjustment.ap_cost;
        caster.mp -= self.adjustment.mp_cost;
        Ok(())
    }
}
