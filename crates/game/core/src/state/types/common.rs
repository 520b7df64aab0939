use std::fmt;

/// Declares a transparent numeric identifier with `Display` as `#<n>`.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Persistent match identifier allocated by the runtime.
    MatchId(u64)
);
id_type!(
    /// Authenticated player account.
    PlayerId(u64)
);
id_type!(
    /// Player-owned character template.
    CharacterId(u32)
);
id_type!(
    /// Enemy (NPC) template.
    EnemyId(u32)
);
id_type!(
    /// Story stage listing a fixed enemy lineup.
    StageId(u32)
);
id_type!(
    /// Authored player spell.
    SpellId(u32)
);
id_type!(
    /// NPC ability, decoded into the same effect shape as spells.
    AbilityId(u32)
);
id_type!(
    /// Entry in the effect catalog.
    EffectId(u32)
);
id_type!(
    /// Match-scoped combatant, equal to its index in creation order.
    CombatantId(u32)
);

/// Element identifier. `0` means "no element".
///
/// Primitive (Tier-0) elements have no recipe; composite elements are produced
/// from ingredients via a [`crate::env::Recipe`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub u16);

impl ElementId {
    /// Non-elemental marker.
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spell mastery level. Mastery 1 is the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Mastery(pub u8);

impl fmt::Display for Mastery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource pools that effects and costs refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Hp,
    Mp,
    Ap,
}
