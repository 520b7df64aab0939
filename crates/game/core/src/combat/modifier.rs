//! Modifier combination and the pluggable policies feeding it.

use crate::config::{CastingModeTable, ModeScaling};
use crate::env::{Effect, MatchupOracle};
use crate::state::{Combatant, ElementId};

use super::elemental_modifier;

/// How hard the caster commits to a cast.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastingMode {
    #[default]
    Normal,
    /// More power for more AP.
    Focused,
    /// Less power for less AP.
    Swift,
}

/// Power modifier and final costs for one cast.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeAdjustment {
    pub power: f64,
    pub ap_cost: i32,
    pub mp_cost: i32,
}

/// Maps a casting mode to a power modifier and adjusted costs.
///
/// Runs before resource checks, so the adjusted costs are the ones validated.
pub trait CastingModePolicy: Send + Sync {
    fn adjust(&self, mode: CastingMode, ap_cost: i32, mp_cost: i32) -> ModeAdjustment;
}

/// Casting-mode policy driven by [`CastingModeTable`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaledCastingModes {
    table: CastingModeTable,
}

impl ScaledCastingModes {
    pub fn new(table: CastingModeTable) -> Self {
        Self { table }
    }
}

impl CastingModePolicy for ScaledCastingModes {
    fn adjust(&self, mode: CastingMode, ap_cost: i32, mp_cost: i32) -> ModeAdjustment {
        let scaling = match mode {
            CastingMode::Normal => ModeScaling::NEUTRAL,
            CastingMode::Focused => self.table.focused,
            CastingMode::Swift => self.table.swift,
        };
        ModeAdjustment {
            power: scaling.power,
            ap_cost: (ap_cost + scaling.ap_delta).max(0),
            mp_cost: (mp_cost + scaling.mp_delta).max(0),
        }
    }
}

/// Status-driven damage/heal scaling (e.g. "weakened" debuffs).
pub trait StatusModifier: Send + Sync {
    fn modifier(&self, caster: &Combatant, target: &Combatant, effect: &Effect) -> f64;
}

/// Always 1.0.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralStatusModifier;

impl StatusModifier for NeutralStatusModifier {
    fn modifier(&self, _caster: &Combatant, _target: &Combatant, _effect: &Effect) -> f64 {
        1.0
    }
}

/// `elemental × status × power`, kept factor by factor for reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedModifier {
    pub elemental: f64,
    pub status: f64,
    pub power: f64,
}

impl CombinedModifier {
    pub fn value(&self) -> f64 {
        self.elemental * self.status * self.power
    }
}

/// Combines the three modifier sources for one (caster, target, effect).
pub fn combine_modifiers(
    matchups: &(impl MatchupOracle + ?Sized),
    status: &dyn StatusModifier,
    spell_element: ElementId,
    caster: &Combatant,
    target: &Combatant,
    effect: &Effect,
    power: f64,
) -> CombinedModifier {
    CombinedModifier {
        elemental: elemental_modifier(matchups, spell_element, target.element),
        status: status.modifier(caster, target, effect),
        power,
    }
}
