//! Player actions and the cast pipeline.
//!
//! A cast runs in four stages: preparation (validate, then commit costs),
//! value calculation, modifier combination and effect application. Only the
//! first stage can reject a cast; once costs are committed every later
//! problem is recorded as a warning on the [`crate::combat::CastReport`].
mod apply;
mod cast;
mod prepare;

pub use cast::{CastRequest, cast_ability, cast_element, cast_spell};
pub use prepare::{CastProfile, PreparedCast, prepare_cast};

use crate::combat::CastingMode;
use crate::state::{CombatantId, ElementId, Mastery, SpellId};

/// Request submitted by a player for the combatant holding the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    CastSpell {
        spell: SpellId,
        target: CombatantId,
        #[cfg_attr(feature = "serde", serde(default))]
        mode: CastingMode,
    },
    /// Cast by element; the spell resolver picks the concrete spell.
    CastElement {
        element: ElementId,
        mastery: Mastery,
        target: CombatantId,
        #[cfg_attr(feature = "serde", serde(default))]
        mode: CastingMode,
    },
    EndTurn,
}
