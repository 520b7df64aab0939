//! Turn advancement, regeneration and match-end detection.

use chrono::{DateTime, Utc};

use crate::env::{ConfigOracle, EffectKind};
use crate::error::Result;
use crate::state::{Combatant, CombatantId, EffectId, MatchStatus, RuleFlags, Team};

use super::{ActionOutcome, CombatEngine};

/// Hook run at the start of every turn to refresh derived stats.
pub trait StatRecalculator: Send + Sync {
    fn recalculate(&self, combatant: &mut Combatant, config: &dyn ConfigOracle);
}

/// Recomputes max HP/MP from level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LevelScaling;

impl StatRecalculator for LevelScaling {
    fn recalculate(&self, combatant: &mut Combatant, config: &dyn ConfigOracle) {
        combatant.recalculate_maximums(config);
    }
}

/// One end-of-turn / start-of-turn transition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub ended: CombatantId,
    /// HP lost to damage-over-time ticks.
    pub dot_damage: i32,
    pub expired: Vec<EffectId>,
    pub shield_expired: bool,
    /// Combatant now holding the turn. Unchanged if the match ended.
    pub next: CombatantId,
    pub turn_number: u32,
    pub ap_granted: i32,
}

impl CombatEngine<'_> {
    /// Ends the current turn and starts the next one.
    ///
    /// Order: DOT ticks, status and shield countdown, match-end check,
    /// advance, then the next combatant's start-of-turn hook and AP regen.
    pub fn advance_turn(&mut self, now: DateTime<Utc>) -> Result<TurnReport> {
        let mut report = self.end_turn()?;
        if self.check_match_end(now).is_some() {
            report.next = self.combat.current;
            report.turn_number = self.combat.turn_number;
            return Ok(report);
        }

        self.advance();
        report.next = self.combat.current;
        report.turn_number = self.combat.turn_number;
        report.ap_granted = self.start_turn()?;
        Ok(report)
    }

    /// End-of-turn bookkeeping for the combatant holding the turn.
    ///
    /// DOT statuses deal their stored value straight to HP; shields do not
    /// absorb it.
    pub fn end_turn(&mut self) -> Result<TurnReport> {
        let current = self.combat.current_combatant()?.id;
        let combatant = self.combat.require_mut(current)?;

        let dot: i32 = combatant
            .statuses
            .iter()
            .filter(|s| s.kind == EffectKind::DebuffDOT)
            .map(|s| s.value.round() as i32)
            .sum();
        let dot_damage = combatant.lose_hp(dot);

        let expired = combatant.statuses.tick();

        let mut shield_expired = false;
        if let Some(pool) = &mut combatant.shield {
            pool.remaining_turns -= 1;
            if pool.remaining_turns <= 0 {
                combatant.shield = None;
                shield_expired = true;
            }
        }

        if dot_damage > 0 {
            tracing::debug!(
                target: "combat::turns",
                combatant = current.0,
                dot_damage,
                "damage over time"
            );
        }

        Ok(TurnReport {
            ended: current,
            dot_damage,
            expired,
            shield_expired,
            ..TurnReport::default()
        })
    }

    /// Moves the turn pointer forward, wrapping to the first combatant and
    /// incrementing the turn number. Skips defeated combatants when
    /// [`RuleFlags::SKIP_DEFEATED`] is set.
    fn advance(&mut self) {
        let count = self.combat.combatants.len();
        if count == 0 {
            return;
        }
        let skip_defeated = self.combat.rules.contains(RuleFlags::SKIP_DEFEATED);
        let mut index = self.combat.current.0 as usize;

        for _ in 0..count {
            index = (index + 1) % count;
            if index == 0 {
                self.combat.turn_number += 1;
            }
            if !skip_defeated || self.combat.combatants[index].is_alive() {
                break;
            }
        }
        self.combat.current = CombatantId(index as u32);
    }

    /// Start-of-turn hook and AP regeneration. Returns the AP granted.
    pub fn start_turn(&mut self) -> Result<i32> {
        let config = self.env.config()?;
        let current = self.combat.current_combatant()?.id;
        let combatant = self.combat.require_mut(current)?;

        self.policies.stats.recalculate(combatant, config);

        let before = combatant.ap;
        combatant.ap = (before + config.ap_per_turn()).min(config.max_ap().max(before));
        Ok(combatant.ap - before)
    }

    /// Finishes the match once a whole team is down.
    ///
    /// The player team is checked first, so a mutual wipe is a loss. Returns
    /// the winner only on the call that ends the match.
    pub fn check_match_end(&mut self, now: DateTime<Utc>) -> Option<Team> {
        if self.combat.is_terminal() {
            return None;
        }
        let winner = if self.combat.team_defeated(Team::Player) {
            Team::Enemy
        } else if self.combat.team_defeated(Team::Enemy) {
            Team::Player
        } else {
            return None;
        };

        self.combat.status = MatchStatus::Finished;
        self.combat.winner = Some(winner);
        self.combat.finished_at.get_or_insert(now);
        tracing::info!(
            target: "combat::engine",
            match_id = self.combat.id.0,
            %winner,
            turn = self.combat.turn_number,
            "match finished"
        );
        Some(winner)
    }

    /// Cancels an in-progress match.
    ///
    /// # Errors
    ///
    /// Returns `CombatError::MatchAlreadyEnded` if the match is already terminal.
    pub fn abort(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.combat.ensure_in_progress()?;
        self.combat.status = MatchStatus::Aborted;
        self.combat.finished_at.get_or_insert(now);
        self.combat.touch(now);
        tracing::info!(target: "combat::engine", match_id = self.combat.id.0, "match aborted");
        Ok(())
    }

    /// Ends the acting combatant's turn and, with
    /// [`RuleFlags::AUTO_NPC_TURNS`], plays NPC turns until a player holds the
    /// turn again or the match ends.
    pub(super) fn finish_turn(&mut self, outcome: &mut ActionOutcome, now: DateTime<Utc>) -> Result<()> {
        let report = self.advance_turn(now)?;
        outcome.turns.push(report);
        if self.combat.is_terminal() {
            outcome.winner = self.combat.winner;
            return Ok(());
        }

        if self.combat.rules.contains(RuleFlags::AUTO_NPC_TURNS) {
            self.play_npc_turns(outcome, now)?;
        }
        Ok(())
    }

    /// Plays queued NPC turns. Bounded by the number of combatants.
    pub fn play_npc_turns(&mut self, outcome: &mut ActionOutcome, now: DateTime<Utc>) -> Result<()> {
        let mut budget = self.combat.combatants.len();
        while budget > 0 && !self.combat.is_terminal() {
            let current = self.combat.current_combatant()?;
            if current.is_player() {
                break;
            }
            budget -= 1;

            let npc_move = self.take_npc_turn()?;
            outcome.npc_moves.push(npc_move);
            if let Some(winner) = self.check_match_end(now) {
                outcome.winner = Some(winner);
                break;
            }

            let report = self.advance_turn(now)?;
            outcome.turns.push(report);
            if self.combat.is_terminal() {
                outcome.winner = self.combat.winner;
                break;
            }
        }

        if !self.combat.is_terminal() && !self.combat.current_combatant()?.is_player() {
            tracing::warn!(
                target: "combat::engine",
                match_id = self.combat.id.0,
                current = self.combat.current.0,
                "NPC turn budget exhausted"
            );
        }
        Ok(())
    }
}
