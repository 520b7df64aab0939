//! Timed statuses carried by combatants.
//!
//! Durations count down at the end of the *affected* combatant's turn; an
//! entry whose remaining turns reach zero is removed in the same step.

use crate::env::EffectKind;

use super::{CombatantId, EffectId};

/// One active buff, debuff, crowd-control or damage-over-time entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub effect: EffectId,
    pub kind: EffectKind,
    /// Final value at application time. DOT ticks deal this much per turn.
    pub value: f64,
    pub remaining_turns: i32,
    pub source: CombatantId,
}

/// Statuses keyed by effect id. At most one entry per effect.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusSet {
    entries: Vec<ActiveStatus>,
}

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a status, or refreshes value, duration and source of the
    /// existing entry with the same effect id.
    pub fn upsert(&mut self, status: ActiveStatus) {
        match self.entries.iter_mut().find(|s| s.effect == status.effect) {
            Some(existing) => *existing = status,
            None => self.entries.push(status),
        }
    }

    pub fn get(&self, effect: EffectId) -> Option<&ActiveStatus> {
        self.entries.iter().find(|s| s.effect == effect)
    }

    pub fn has_effect(&self, effect: EffectId) -> bool {
        self.get(effect).is_some()
    }

    pub fn has_kind(&self, kind: EffectKind) -> bool {
        self.entries.iter().any(|s| s.kind == kind)
    }

    pub fn has_buff(&self) -> bool {
        self.entries.iter().any(|s| s.kind.is_buff())
    }

    pub fn has_debuff(&self) -> bool {
        self.entries.iter().any(|s| s.kind.is_debuff())
    }

    /// Removes the entry for `effect`, returning it.
    pub fn remove(&mut self, effect: EffectId) -> Option<ActiveStatus> {
        let index = self.entries.iter().position(|s| s.effect == effect)?;
        Some(self.entries.remove(index))
    }

    /// Removes the first entry of the given kind.
    pub fn remove_kind(&mut self, kind: EffectKind) -> Option<ActiveStatus> {
        let index = self.entries.iter().position(|s| s.kind == kind)?;
        Some(self.entries.remove(index))
    }

    /// Removes every entry matching the predicate and returns the removed effect ids.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&ActiveStatus) -> bool) -> Vec<EffectId> {
        let mut removed = Vec::new();
        self.entries.retain(|s| {
            if predicate(s) {
                removed.push(s.effect);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Decrements every entry and drops the ones that ran out.
    ///
    /// Returns the effect ids that expired.
    pub fn tick(&mut self) -> Vec<EffectId> {
        for status in &mut self.entries {
            status.remaining_turns -= 1;
        }
        self.remove_where(|s| s.remaining_turns <= 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
