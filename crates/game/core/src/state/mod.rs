//! Combat match state.
//!
//! [`CombatMatch`] is the aggregate persisted by the runtime. It is created
//! once, mutated by every action and turn, and frozen once its status becomes
//! terminal.
mod combatant;
mod status;
mod types;

use chrono::{DateTime, Utc};

pub use combatant::{Charge, Combatant, CombatantRef, ShieldPool, Team};
pub use status::{ActiveStatus, StatusSet};
pub use types::{
    AbilityId, CharacterId, CombatantId, EffectId, ElementId, EnemyId, Mastery, MatchId,
    PlayerId, ResourceKind, SpellId, StageId,
};

use crate::error::{CombatError, Missing, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchType {
    Training,
    Story,
    Pvp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStatus {
    InProgress,
    Finished,
    Aborted,
}

impl MatchStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Aborted)
    }
}

bitflags::bitflags! {
    /// Per-match rule modifiers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct RuleFlags: u8 {
        /// Ending a player turn plays queued NPC turns immediately.
        const AUTO_NPC_TURNS = 0b0000_0001;
        /// Turn advancement skips combatants at 0 HP.
        const SKIP_DEFEATED  = 0b0000_0010;
    }
}

impl Default for RuleFlags {
    fn default() -> Self {
        Self::AUTO_NPC_TURNS | Self::SKIP_DEFEATED
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatMatch {
    pub id: MatchId,
    pub owner: PlayerId,
    pub match_type: MatchType,
    pub status: MatchStatus,
    /// Starts at 1 and increments whenever turn order wraps.
    pub turn_number: u32,
    /// Combatant holding the turn.
    pub current: CombatantId,
    /// Fixed turn order, indexed by [`CombatantId`].
    pub combatants: Vec<Combatant>,
    pub rules: RuleFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub winner: Option<Team>,
}

impl CombatMatch {
    pub fn new(
        id: MatchId,
        owner: PlayerId,
        match_type: MatchType,
        combatants: Vec<Combatant>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            match_type,
            status: MatchStatus::InProgress,
            turn_number: 1,
            current: CombatantId(0),
            combatants,
            rules: RuleFlags::default(),
            created_at: now,
            updated_at: now,
            finished_at: None,
            winner: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// # Errors
    ///
    /// Returns `CombatError::MatchAlreadyEnded` for Finished or Aborted matches.
    pub fn ensure_in_progress(&self) -> Result<()> {
        if self.is_terminal() {
            Err(CombatError::MatchAlreadyEnded(self.id))
        } else {
            Ok(())
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.0 as usize)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.0 as usize)
    }

    /// # Errors
    ///
    /// Returns `CombatError::NotFound` if no combatant has this id.
    pub fn require(&self, id: CombatantId) -> Result<&Combatant> {
        self.combatant(id)
            .ok_or(CombatError::NotFound(Missing::Combatant(id)))
    }

    pub fn require_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        self.combatant_mut(id)
            .ok_or(CombatError::NotFound(Missing::Combatant(id)))
    }

    /// Combatant holding the turn.
    ///
    /// # Errors
    ///
    /// A dangling turn pointer is an internal inconsistency and surfaces as
    /// `CombatError::System`.
    pub fn current_combatant(&self) -> Result<&Combatant> {
        self.combatant(self.current).ok_or_else(|| {
            CombatError::system(format!(
                "current combatant {} missing from match {}",
                self.current, self.id
            ))
        })
    }

    /// Living members of a team in turn order.
    pub fn living(&self, team: Team) -> impl Iterator<Item = &Combatant> {
        self.combatants
            .iter()
            .filter(move |c| c.team() == team && c.is_alive())
    }

    pub fn team_defeated(&self, team: Team) -> bool {
        self.living(team).next().is_none()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_enable_auto_turns_and_skipping() {
        let rules = RuleFlags::default();
        assert!(rules.contains(RuleFlags::AUTO_NPC_TURNS));
        assert!(rules.contains(RuleFlags::SKIP_DEFEATED));
    }

    #[test]
    fn dangling_turn_pointer_is_a_system_error() {
        let mut combat = CombatMatch::new(
            MatchId(1),
            PlayerId(1),
            MatchType::Training,
            Vec::new(),
            Utc::now(),
        );
        combat.current = CombatantId(3);

        assert!(matches!(
            combat.current_combatant(),
            Err(CombatError::System(_))
        ));
    }

    #[test]
    fn terminal_matches_reject_work() {
        let mut combat = CombatMatch::new(
            MatchId(9),
            PlayerId(1),
            MatchType::Story,
            Vec::new(),
            Utc::now(),
        );
        assert!(combat.ensure_in_progress().is_ok());

        combat.status = MatchStatus::Aborted;
        assert_eq!(
            combat.ensure_in_progress(),
            Err(CombatError::MatchAlreadyEnded(MatchId(9)))
        );
    }
}
