//! Structured cast outcomes.

use std::fmt;

use crate::env::EffectKind;
use crate::state::{AbilityId, CombatantId, EffectId, ElementId, SpellId};

use super::{CastingMode, ResolutionStep};

/// What was cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastSource {
    Spell(SpellId),
    Ability(AbilityId),
}

/// Result of one effect on one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectOutcome {
    pub effect: EffectId,
    pub kind: EffectKind,
    pub target: CombatantId,
    /// `initial × combined` before rounding.
    pub final_value: f64,
    pub evaded: bool,
    /// Damage soaked by the shield pool.
    pub absorbed: i32,
    /// HP lost or restored, shield added, resource delta, status value, or
    /// statuses cleansed, depending on `kind`.
    pub actual: i32,
}

/// Non-fatal problem recorded while applying a cast.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastWarning {
    EffectMissing(EffectId),
    /// Resource effect without an AP/MP resource in the catalog.
    ResourceUnspecified(EffectId),
    /// Utility effect without a cleanse filter.
    CleanseUnspecified(EffectId),
    MalformedCondition { effect: EffectId, detail: String },
    TargetDefeated { effect: EffectId, target: CombatantId },
    ProvisionalTalentBonus { element: ElementId, ingredients: usize },
}

impl fmt::Display for CastWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EffectMissing(id) => write!(f, "effect {id} missing from catalog"),
            Self::ResourceUnspecified(id) => write!(f, "effect {id} has no resource kind"),
            Self::CleanseUnspecified(id) => write!(f, "effect {id} has no cleanse filter"),
            Self::MalformedCondition { effect, detail } => {
                write!(f, "effect {effect} has malformed condition detail {detail:?}")
            }
            Self::TargetDefeated { effect, target } => {
                write!(f, "effect {effect} skipped, target {target} already defeated")
            }
            Self::ProvisionalTalentBonus {
                element,
                ingredients,
            } => write!(
                f,
                "talent bonus for element {element} summed over {ingredients} ingredients is provisional"
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastTotals {
    pub damage: i32,
    pub healing: i32,
    pub absorbed: i32,
    pub evaded: u32,
}

impl CastTotals {
    pub fn record(&mut self, outcome: &EffectOutcome) {
        if outcome.evaded {
            self.evaded += 1;
        }
        self.absorbed += outcome.absorbed;
        match outcome.kind {
            EffectKind::Damage | EffectKind::TrueDamage => self.damage += outcome.actual,
            EffectKind::Heal => self.healing += outcome.actual,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastReport {
    pub caster: CombatantId,
    pub source: CastSource,
    pub element: ElementId,
    /// Set when the spell came from the resolver.
    pub resolution: Option<ResolutionStep>,
    pub mode: CastingMode,
    pub ap_spent: i32,
    pub mp_spent: i32,
    pub charge_consumed: Option<ElementId>,
    pub outcomes: Vec<EffectOutcome>,
    pub warnings: Vec<CastWarning>,
    pub totals: CastTotals,
}

impl CastReport {
    pub fn push(&mut self, outcome: EffectOutcome) {
        self.totals.record(&outcome);
        self.outcomes.push(outcome);
    }

    pub fn warn(&mut self, warning: CastWarning) {
        tracing::warn!(target: "combat::cast", caster = self.caster.0, %warning, "cast warning");
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_split_damage_and_healing() {
        let mut totals = CastTotals::default();
        let hit = EffectOutcome {
            effect: EffectId(1),
            kind: EffectKind::Damage,
            target: CombatantId(1),
            final_value: 12.0,
            evaded: false,
            absorbed: 4,
            actual: 8,
        };
        totals.record(&hit);
        totals.record(&EffectOutcome {
            kind: EffectKind::Heal,
            absorbed: 0,
            actual: 5,
            ..hit.clone()
        });
        totals.record(&EffectOutcome {
            evaded: true,
            absorbed: 0,
            actual: 0,
            ..hit
        });

        assert_eq!(
            totals,
            CastTotals {
                damage: 8,
                healing: 5,
                absorbed: 4,
                evaded: 1
            }
        );
    }
}
