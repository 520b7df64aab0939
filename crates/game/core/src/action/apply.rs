//! Effect application engine.
//!
//! Applies a prepared cast's effects in declaration order. Per-effect
//! problems become [`CastWarning`]s and never stop sibling effects.

use crate::combat::{
    CastReport, CastWarning, EffectOutcome, StatusModifier, TalentBonus, combine_modifiers,
    initial_value,
};
use crate::env::{
    ConditionKind, Effect, EffectCondition, EffectFlags, EffectKind, EffectOracle, GameEnv,
    SpellEffect,
};
use crate::error::Result;
use crate::state::{ActiveStatus, CombatMatch, Combatant, CombatantId, EffectId, ResourceKind};

use super::PreparedCast;

/// Applies every effect of `prepared` and records outcomes in `report`.
///
/// # Errors
///
/// Only a missing oracle or a vanished combatant fails the call; resources
/// already spent stay spent.
pub(crate) fn apply_effects(
    combat: &mut CombatMatch,
    env: &GameEnv<'_>,
    status: &dyn StatusModifier,
    prepared: &PreparedCast,
    talent: &TalentBonus,
    report: &mut CastReport,
) -> Result<()> {
    let effects = env.effects()?;
    let matchups = env.matchups()?;
    let config = env.config()?;
    let mastery_step = config.mastery_step();
    let max_ap = config.max_ap();

    for entry in &prepared.profile.effects {
        let Some(effect) = effects.effect(entry.effect) else {
            report.warn(CastWarning::EffectMissing(entry.effect));
            continue;
        };

        let targets = if effect.kind == EffectKind::SynergyBuff {
            vec![prepared.caster]
        } else {
            prepared.targets.clone()
        };

        for target_id in targets {
            let caster = combat.require(prepared.caster)?.clone();
            let target = combat.require_mut(target_id)?;

            if !target.is_alive() {
                report.warn(CastWarning::TargetDefeated {
                    effect: effect.id,
                    target: target_id,
                });
                continue;
            }

            if let Some(condition) = &entry.condition {
                match condition_holds(condition, &caster, target) {
                    Some(true) => {}
                    Some(false) => continue,
                    None => {
                        report.warn(CastWarning::MalformedCondition {
                            effect: effect.id,
                            detail: condition.detail.clone(),
                        });
                        continue;
                    }
                }
            }

            let initial = initial_value(entry.base_value, prepared.profile.mastery, mastery_step, talent);
            let combined = combine_modifiers(
                matchups,
                status,
                prepared.profile.element,
                &caster,
                target,
                &effect,
                prepared.adjustment.power,
            );
            let final_value = initial * combined.value();

            let mut outcome = EffectOutcome {
                effect: effect.id,
                kind: effect.kind,
                target: target_id,
                final_value,
                evaded: false,
                absorbed: 0,
                actual: 0,
            };

            let applied = apply_one(
                target,
                &effect,
                entry,
                &mut outcome,
                prepared.caster,
                effects,
                max_ap,
            );
            if let Err(warning) = applied {
                report.warn(warning);
                continue;
            }

            tracing::debug!(
                target: "combat::apply",
                effect = effect.id.0,
                kind = %effect.kind,
                target_id = target_id.0,
                final_value,
                actual = outcome.actual,
                "effect applied"
            );
            report.push(outcome);
        }
    }

    Ok(())
}

fn apply_one(
    target: &mut Combatant,
    effect: &Effect,
    entry: &SpellEffect,
    outcome: &mut EffectOutcome,
    caster: CombatantId,
    effects: &(dyn EffectOracle + '_),
    max_ap: i32,
) -> core::result::Result<(), CastWarning> {
    let amount = outcome.final_value.round() as i32;

    match effect.kind {
        EffectKind::Damage => {
            if let Some(evasion) = active_evasion(target, effects) {
                target.statuses.remove(evasion);
                outcome.evaded = true;
                return Ok(());
            }
            let damage = amount.max(0);
            let absorbed = target.absorb(damage);
            outcome.absorbed = absorbed;
            outcome.actual = target.lose_hp(damage - absorbed);
        }
        EffectKind::TrueDamage => {
            outcome.actual = target.lose_hp(amount.max(0));
        }
        EffectKind::Heal => {
            outcome.actual = target.restore_hp(amount.max(0));
        }
        EffectKind::Shield => {
            let shield = amount.max(0);
            target.add_shield(shield, entry.duration, effect.id);
            outcome.actual = shield;
        }
        EffectKind::Resource => {
            let resource = effect
                .resource
                .ok_or(CastWarning::ResourceUnspecified(effect.id))?;
            outcome.actual = adjust_resource(target, resource, amount, max_ap);
        }
        EffectKind::Utility => {
            let filter = effect
                .cleanse
                .ok_or(CastWarning::CleanseUnspecified(effect.id))?;
            let removed = target
                .statuses
                .remove_where(|s| filter.matches(s.effect, s.kind));
            outcome.actual = removed.len() as i32;
        }
        EffectKind::Buff
        | EffectKind::Debuff
        | EffectKind::DebuffCC
        | EffectKind::DebuffHardCC
        | EffectKind::SynergyBuff
        | EffectKind::DebuffDOT => {
            target.statuses.upsert(ActiveStatus {
                effect: effect.id,
                kind: effect.kind,
                value: outcome.final_value,
                remaining_turns: entry.duration.max(1),
                source: caster,
            });
            outcome.actual = amount;
        }
    }
    Ok(())
}

/// Active status whose catalog effect carries the evasion flag.
fn active_evasion(target: &Combatant, effects: &(dyn EffectOracle + '_)) -> Option<EffectId> {
    target
        .statuses
        .iter()
        .find(|s| {
            effects
                .effect(s.effect)
                .is_some_and(|e| e.flags.contains(EffectFlags::EVASION))
        })
        .map(|s| s.effect)
}

/// Signed adjustment clamped to `[0, max]`. Returns the applied delta.
fn adjust_resource(target: &mut Combatant, resource: ResourceKind, amount: i32, max_ap: i32) -> i32 {
    let (current, max) = match resource {
        ResourceKind::Hp => (&mut target.hp, target.max_hp),
        ResourceKind::Mp => (&mut target.mp, target.max_mp),
        ResourceKind::Ap => (&mut target.ap, max_ap),
    };
    let before = *current;
    *current = (before + amount).clamp(0, max.max(before));
    *current - before
}

/// What a status condition's `detail` asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatusQuery {
    Effect(EffectId),
    Kind(EffectKind),
    AnyBuff,
    AnyDebuff,
    Any,
}

impl StatusQuery {
    fn parse(detail: &str) -> Option<Self> {
        let detail = detail.trim();
        if detail.is_empty() {
            return Some(Self::Any);
        }
        if let Ok(id) = detail.parse::<u32>() {
            return Some(Self::Effect(EffectId(id)));
        }
        match detail.to_ascii_lowercase().as_str() {
            "buff" => return Some(Self::AnyBuff),
            "debuff" => return Some(Self::AnyDebuff),
            _ => {}
        }
        detail.parse::<EffectKind>().ok().map(Self::Kind)
    }

    fn holds(self, combatant: &Combatant) -> bool {
        let statuses = &combatant.statuses;
        match self {
            Self::Effect(id) => statuses.has_effect(id),
            Self::Kind(kind) => statuses.has_kind(kind),
            Self::AnyBuff => statuses.has_buff(),
            Self::AnyDebuff => statuses.has_debuff(),
            Self::Any => !statuses.is_empty(),
        }
    }
}

/// `None` when the detail string cannot be interpreted.
fn condition_holds(condition: &EffectCondition, caster: &Combatant, target: &Combatant) -> Option<bool> {
    let percent = || condition.detail.trim().parse::<f64>().ok();
    match condition.kind {
        ConditionKind::TargetHpBelow => percent().map(|p| target.hp_percent() < p),
        ConditionKind::TargetHpAbove => percent().map(|p| target.hp_percent() > p),
        ConditionKind::TargetHasStatus => StatusQuery::parse(&condition.detail).map(|q| q.holds(target)),
        ConditionKind::CasterHasStatus => StatusQuery::parse(&condition.detail).map(|q| q.holds(caster)),
        ConditionKind::TargetHasShield => Some(target.shield_amount() > 0),
    }
}
