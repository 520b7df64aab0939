//! NPC turns driven by the rule-based AI.

use crate::action::{CastRequest, cast_ability};
use crate::ai::{AiAction, AiDecision, decide};
use crate::combat::{CastReport, CastingMode};
use crate::env::EffectKind;
use crate::error::{CombatError, Result};
use crate::state::{AbilityId, CombatantId, EffectId};

use super::CombatEngine;

/// What an NPC did on its turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcMoveKind {
    Ability(CastReport),
    Defend { shield: i32 },
    Pass,
    /// Reported only; the NPC stays in the match.
    Flee,
    /// Hard crowd control consumed instead of acting.
    Suppressed(EffectId),
    /// The chosen ability could not be cast; treated as a pass.
    Degraded {
        ability: Option<AbilityId>,
        reason: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcMove {
    pub combatant: CombatantId,
    pub decision: AiDecision,
    pub kind: NpcMoveKind,
}

impl CombatEngine<'_> {
    /// Decides and executes one move for the NPC holding the turn.
    ///
    /// Does not end the turn.
    pub fn take_npc_turn(&mut self) -> Result<NpcMove> {
        let current = self.combat.current_combatant()?;
        let id = current.id;
        let Some(enemy) = current.enemy_id() else {
            return Err(CombatError::validation(format!(
                "combatant {id} is not an NPC"
            )));
        };

        let pass = |kind| NpcMove {
            combatant: id,
            decision: AiDecision::PASS,
            kind,
        };

        if !current.is_alive() {
            return Ok(pass(NpcMoveKind::Pass));
        }

        if let Some(status) = self
            .combat
            .require_mut(id)?
            .statuses
            .remove_kind(EffectKind::DebuffHardCC)
        {
            tracing::debug!(target: "combat::ai", npc = id.0, "NPC suppressed by hard crowd control");
            return Ok(pass(NpcMoveKind::Suppressed(status.effect)));
        }

        let Some(rules) = self.env.roster()?.rules(enemy) else {
            tracing::warn!(target: "combat::ai", npc = id.0, enemy = enemy.0, "no AI rules, passing");
            return Ok(pass(NpcMoveKind::Pass));
        };
        let decision = decide(self.combat, id, &rules);

        let kind = match decision.action {
            AiAction::UseAbility => self.use_ability(id, &decision),
            AiAction::Defend => {
                let config = self.env.config()?;
                let shield = config.defend_shield();
                self.combat
                    .require_mut(id)?
                    .add_shield(shield, config.defend_duration(), EffectId::default());
                NpcMoveKind::Defend { shield }
            }
            AiAction::Pass => NpcMoveKind::Pass,
            AiAction::Flee => {
                tracing::info!(target: "combat::ai", npc = id.0, "NPC attempts to flee");
                NpcMoveKind::Flee
            }
        };

        tracing::debug!(
            target: "combat::ai",
            npc = id.0,
            action = %decision.action,
            priority = ?decision.priority,
            "NPC move"
        );
        Ok(NpcMove {
            combatant: id,
            decision,
            kind,
        })
    }

    fn use_ability(&mut self, id: CombatantId, decision: &AiDecision) -> NpcMoveKind {
        let (Some(ability), Some(target)) = (decision.ability, decision.target) else {
            return NpcMoveKind::Degraded {
                ability: decision.ability,
                reason: "rule has no ability or target".into(),
            };
        };

        let request = CastRequest {
            caster: id,
            target,
            mode: CastingMode::Normal,
        };
        match cast_ability(self.combat, &self.env, self.policies, request, ability) {
            Ok(report) => NpcMoveKind::Ability(report),
            Err(err) => {
                tracing::warn!(
                    target: "combat::ai",
                    npc = id.0,
                    ability = ability.0,
                    error = %err,
                    "ability failed, degrading to pass"
                );
                NpcMoveKind::Degraded {
                    ability: Some(ability),
                    reason: err.to_string(),
                }
            }
        }
    }
}
