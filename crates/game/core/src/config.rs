use crate::env::{ConfigKey, ConfigOracle};

/// Numeric combat rules and tunable parameters.
///
/// Loaded from TOML by the content crate; every field falls back to the
/// [`ConfigKey`] default when omitted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// AP granted at the start of each turn.
    pub ap_per_turn: i32,
    pub max_ap: i32,
    /// Starting AP is `min(base_ap_cap, max_ap)`.
    pub base_ap_cap: i32,
    pub talent_divisor: f64,
    /// Multiplier gained per mastery level above 1.
    pub mastery_step: f64,
    pub hp_per_level: i32,
    pub mp_per_level: i32,
    /// Shield granted by the AI `Defend` action.
    pub defend_shield: i32,
    pub defend_duration: i32,
    pub casting_modes: CastingModeTable,
}

impl CombatConfig {
    pub const MAX_COMBATANTS: usize = 8;

    pub fn new() -> Self {
        Self {
            ap_per_turn: ConfigKey::ApPerTurn.default_value() as i32,
            max_ap: ConfigKey::MaxAp.default_value() as i32,
            base_ap_cap: ConfigKey::BaseApCap.default_value() as i32,
            talent_divisor: ConfigKey::TalentDivisor.default_value(),
            mastery_step: ConfigKey::MasteryStep.default_value(),
            hp_per_level: ConfigKey::HpPerLevel.default_value() as i32,
            mp_per_level: ConfigKey::MpPerLevel.default_value() as i32,
            defend_shield: ConfigKey::DefendShield.default_value() as i32,
            defend_duration: ConfigKey::DefendDuration.default_value() as i32,
            casting_modes: CastingModeTable::default(),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigOracle for CombatConfig {
    fn value(&self, key: ConfigKey) -> Option<f64> {
        Some(match key {
            ConfigKey::ApPerTurn => self.ap_per_turn as f64,
            ConfigKey::MaxAp => self.max_ap as f64,
            ConfigKey::BaseApCap => self.base_ap_cap as f64,
            ConfigKey::TalentDivisor => self.talent_divisor,
            ConfigKey::MasteryStep => self.mastery_step,
            ConfigKey::HpPerLevel => self.hp_per_level as f64,
            ConfigKey::MpPerLevel => self.mp_per_level as f64,
            ConfigKey::DefendShield => self.defend_shield as f64,
            ConfigKey::DefendDuration => self.defend_duration as f64,
        })
    }
}

/// Power and cost adjustments per casting mode. `Normal` is always neutral.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CastingModeTable {
    pub focused: ModeScaling,
    pub swift: ModeScaling,
}

impl Default for CastingModeTable {
    fn default() -> Self {
        Self {
            focused: ModeScaling {
                power: 1.5,
                ap_delta: 1,
                mp_delta: 0,
            },
            swift: ModeScaling {
                power: 0.75,
                ap_delta: -1,
                mp_delta: 0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeScaling {
    pub power: f64,
    /// Added to the base AP cost; the result never drops below zero.
    pub ap_delta: i32,
    pub mp_delta: i32,
}

impl ModeScaling {
    pub const NEUTRAL: Self = Self {
        power: 1.0,
        ap_delta: 0,
        mp_delta: 0,
    };
}
