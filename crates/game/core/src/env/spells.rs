use crate::state::{EffectId, ElementId, Mastery, SpellId};

/// Authored player spells.
pub trait SpellOracle: Send + Sync {
    fn spell(&self, id: SpellId) -> Option<Spell>;

    /// Exact (element, mastery) lookup used by the spell resolver.
    fn spell_for(&self, element: ElementId, mastery: Mastery) -> Option<Spell>;
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub element: ElementId,
    pub mastery: Mastery,
    pub ap_cost: i32,
    pub mp_cost: i32,
    pub target: TargetType,
    /// Applied in order.
    pub effects: Vec<SpellEffect>,
}

/// Who a spell or ability may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    SelfOnly,
    Enemy,
    Ally,
    AllEnemies,
    AllAllies,
}

impl TargetType {
    pub const fn is_area(self) -> bool {
        matches!(self, Self::AllEnemies | Self::AllAllies)
    }

    /// True when the target must be on the opposing team.
    pub const fn is_hostile(self) -> bool {
        matches!(self, Self::Enemy | Self::AllEnemies)
    }
}

/// One entry of a spell's ordered effect list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellEffect {
    pub effect: EffectId,
    pub base_value: f64,
    /// Turns for timed statuses and shields. Ignored by instant effects.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<EffectCondition>,
}

impl SpellEffect {
    pub fn new(effect: EffectId, base_value: f64) -> Self {
        Self {
            effect,
            base_value,
            duration: 0,
            condition: None,
        }
    }

    #[must_use]
    pub fn lasting(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn when(mut self, kind: ConditionKind, detail: impl Into<String>) -> Self {
        self.condition = Some(EffectCondition {
            kind,
            detail: detail.into(),
        });
        self
    }
}

/// Gate evaluated before an effect applies.
///
/// `detail` is interpreted per kind: a percentage for the HP checks, and an
/// effect id, effect kind name, or `buff`/`debuff` for the status checks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectCondition {
    pub kind: ConditionKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionKind {
    TargetHpBelow,
    TargetHpAbove,
    TargetHasStatus,
    CasterHasStatus,
    TargetHasShield,
}
