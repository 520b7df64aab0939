use crate::state::{EffectId, ResourceKind};

pub trait EffectOracle: Send + Sync {
    fn effect(&self, id: EffectId) -> Option<Effect>;
}

/// Effect catalog entry.
///
/// # Design: Base + Metadata
///
/// - `kind` decides how the application engine treats the effect
/// - `resource` is only meaningful for [`EffectKind::Resource`]
/// - `cleanse` is only meaningful for [`EffectKind::Utility`]
/// - `flags` tag special behaviour such as evasion
///
/// Missing metadata is not a load error; the application engine records a
/// warning and moves on to the next effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub id: EffectId,
    pub name: String,
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource: Option<ResourceKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: EffectFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cleanse: Option<CleanseFilter>,
}

impl Effect {
    pub fn new(id: EffectId, name: impl Into<String>, kind: EffectKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            resource: None,
            flags: EffectFlags::empty(),
            cleanse: None,
        }
    }

    #[must_use]
    pub fn with_resource(mut self, resource: ResourceKind) -> Self {
        self.resource = Some(resource);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EffectFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_cleanse(mut self, filter: CleanseFilter) -> Self {
        self.cleanse = Some(filter);
        self
    }
}

/// How the application engine interprets an effect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// HP loss, absorbed by shields first.
    Damage,
    /// HP loss that ignores shields and evasion.
    TrueDamage,
    /// Adds to the target's shield pool.
    Shield,
    /// HP gain capped at max HP.
    Heal,
    /// Signed AP or MP adjustment.
    Resource,
    /// Cleanse and other non-numeric effects.
    Utility,
    Buff,
    Debuff,
    /// Soft crowd control.
    DebuffCC,
    /// Suppresses the target's next action entirely.
    DebuffHardCC,
    /// Buff that always lands on the caster.
    SynergyBuff,
    /// Damage over time, ticks at end of turn.
    DebuffDOT,
}

impl EffectKind {
    /// Kinds stored as timed status entries on the target.
    pub const fn is_status(self) -> bool {
        matches!(
            self,
            Self::Buff
                | Self::Debuff
                | Self::DebuffCC
                | Self::DebuffHardCC
                | Self::SynergyBuff
                | Self::DebuffDOT
        )
    }

    pub const fn is_buff(self) -> bool {
        matches!(self, Self::Buff | Self::SynergyBuff)
    }

    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            Self::Debuff | Self::DebuffCC | Self::DebuffHardCC | Self::DebuffDOT
        )
    }
}

bitflags::bitflags! {
    /// Special behaviour tags on catalog effects.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct EffectFlags: u8 {
        /// While active as a status, the next non-true damage hit is evaded
        /// and the status is consumed.
        const EVASION = 0b0000_0001;
    }
}

/// Which debuffs a cleanse removes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CleanseFilter {
    AllDebuffs,
    Kind(EffectKind),
    Effect(EffectId),
}

impl CleanseFilter {
    /// Returns true if a status with the given effect and kind should be removed.
    ///
    /// Only debuff kinds are ever cleansed, whatever the filter says.
    pub fn matches(&self, effect: EffectId, kind: EffectKind) -> bool {
        if !kind.is_debuff() {
            return false;
        }
        match self {
            Self::AllDebuffs => true,
            Self::Kind(filter) => *filter == kind,
            Self::Effect(filter) => *filter == effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanse_never_touches_buffs() {
        let filter = CleanseFilter::AllDebuffs;
        assert!(filter.matches(EffectId(1), EffectKind::DebuffDOT));
        assert!(!filter.matches(EffectId(1), EffectKind::Buff));
        assert!(!CleanseFilter::Effect(EffectId(2)).matches(EffectId(2), EffectKind::SynergyBuff));
    }

    #[test]
    fn kind_filter_is_exact() {
        let filter = CleanseFilter::Kind(EffectKind::DebuffCC);
        assert!(filter.matches(EffectId(9), EffectKind::DebuffCC));
        assert!(!filter.matches(EffectId(9), EffectKind::DebuffHardCC));
    }

    #[test]
    fn kind_names_parse() {
        assert_eq!("DebuffDOT".parse::<EffectKind>(), Ok(EffectKind::DebuffDOT));
        assert_eq!(EffectKind::TrueDamage.to_string(), "TrueDamage");
    }
}
