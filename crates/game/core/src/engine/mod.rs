//! Turn handling and action execution.
//!
//! The [`CombatEngine`] is the authoritative reducer for a [`CombatMatch`].
//! It checks turn ownership, routes casts through the action pipeline, runs
//! end-of-turn bookkeeping, plays NPC turns and detects the end of the match.

mod npc;
mod setup;
mod turns;

pub use npc::{NpcMove, NpcMoveKind};
pub use setup::{CreateMatchRequest, create_match};
pub use turns::{LevelScaling, StatRecalculator, TurnReport};

use chrono::{DateTime, Utc};

use crate::action::{Action, CastRequest, cast_element, cast_spell};
use crate::combat::{
    CastReport, CastingModePolicy, NeutralStatusModifier, ScaledCastingModes, StatusModifier,
};
use crate::config::CombatConfig;
use crate::env::{EffectKind, GameEnv};
use crate::error::{CombatError, Result};
use crate::state::{CombatMatch, CombatantId, EffectId, PlayerId, Team};

/// Pluggable rules consulted by the engine.
pub struct CombatPolicies {
    pub casting: Box<dyn CastingModePolicy>,
    pub status: Box<dyn StatusModifier>,
    pub stats: Box<dyn StatRecalculator>,
}

impl CombatPolicies {
    /// Standard policies with casting-mode scaling taken from `config`.
    pub fn from_config(config: &CombatConfig) -> Self {
        Self {
            casting: Box::new(ScaledCastingModes::new(config.casting_modes)),
            ..Self::default()
        }
    }
}

impl Default for CombatPolicies {
    fn default() -> Self {
        Self {
            casting: Box::new(ScaledCastingModes::default()),
            status: Box::new(NeutralStatusModifier),
            stats: Box::new(LevelScaling),
        }
    }
}

impl std::fmt::Debug for CombatPolicies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatPolicies").finish_non_exhaustive()
    }
}

/// Everything that happened in response to one action.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub caster: CombatantId,
    pub cast: Option<CastReport>,
    /// Hard-CC status consumed instead of acting.
    pub suppressed: Option<EffectId>,
    /// Turn transitions in order, including those after NPC moves.
    pub turns: Vec<TurnReport>,
    pub npc_moves: Vec<NpcMove>,
    /// Set when this action ended the match.
    pub winner: Option<Team>,
}

pub struct CombatEngine<'a> {
    combat: &'a mut CombatMatch,
    env: GameEnv<'a>,
    policies: &'a CombatPolicies,
}

impl<'a> CombatEngine<'a> {
    pub fn new(combat: &'a mut CombatMatch, env: GameEnv<'a>, policies: &'a CombatPolicies) -> Self {
        Self {
            combat,
            env,
            policies,
        }
    }

    pub fn combat(&self) -> &CombatMatch {
        self.combat
    }

    /// Executes a player action for `caster` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// - `MatchAlreadyEnded` on a terminal match
    /// - `PermissionDenied` if `actor` does not own the match or `caster` is
    ///   not a player combatant
    /// - `Validation` if `caster` does not hold the turn
    /// - `System` if the turn pointer is dangling
    /// - any cast preparation error
    pub fn perform_action(
        &mut self,
        actor: PlayerId,
        caster: CombatantId,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<ActionOutcome> {
        self.validate_actor(actor, caster)?;

        let mut outcome = ActionOutcome {
            caster,
            ..ActionOutcome::default()
        };

        // Hard crowd control eats whatever the combatant does next, ending the turn included.
        if let Some(status) = self
            .combat
            .require_mut(caster)?
            .statuses
            .remove_kind(EffectKind::DebuffHardCC)
        {
            tracing::info!(
                target: "combat::engine",
                match_id = self.combat.id.0,
                caster = caster.0,
                effect = status.effect.0,
                "action suppressed by hard crowd control"
            );
            outcome.suppressed = Some(status.effect);
            self.finish_turn(&mut outcome, now)?;
            self.combat.touch(now);
            return Ok(outcome);
        }

        match action {
            Action::CastSpell { spell, target, mode } => {
                let request = CastRequest {
                    caster,
                    target,
                    mode,
                };
                let report = cast_spell(self.combat, &self.env, self.policies, request, spell)?;
                outcome.cast = Some(report);
                outcome.winner = self.check_match_end(now);
            }
            Action::CastElement {
                element,
                mastery,
                target,
                mode,
            } => {
                let request = CastRequest {
                    caster,
                    target,
                    mode,
                };
                let report = cast_element(
                    self.combat,
                    &self.env,
                    self.policies,
                    request,
                    element,
                    mastery,
                )?;
                outcome.cast = Some(report);
                outcome.winner = self.check_match_end(now);
            }
            Action::EndTurn => self.finish_turn(&mut outcome, now)?,
        }

        self.combat.touch(now);
        Ok(outcome)
    }

    fn validate_actor(&self, actor: PlayerId, caster: CombatantId) -> Result<()> {
        self.combat.ensure_in_progress()?;

        if self.combat.owner != actor {
            return Err(CombatError::permission_denied(format!(
                "player {actor} does not own match {}",
                self.combat.id
            )));
        }

        let current = self.combat.current_combatant()?.id;
        let combatant = self.combat.require(caster)?;
        if !combatant.is_player() {
            return Err(CombatError::permission_denied(format!(
                "combatant {caster} is not controlled by a player"
            )));
        }
        if current != caster {
            return Err(CombatError::validation(format!(
                "combatant {caster} does not hold the turn (current: {current})"
            )));
        }
        Ok(())
    }
}
