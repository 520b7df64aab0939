//! Configuration oracle for numeric combat rules.

/// Named numeric settings read by the engine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConfigKey {
    ApPerTurn,
    MaxAp,
    BaseApCap,
    TalentDivisor,
    MasteryStep,
    HpPerLevel,
    MpPerLevel,
    DefendShield,
    DefendDuration,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 9] = [
        Self::ApPerTurn,
        Self::MaxAp,
        Self::BaseApCap,
        Self::TalentDivisor,
        Self::MasteryStep,
        Self::HpPerLevel,
        Self::MpPerLevel,
        Self::DefendShield,
        Self::DefendDuration,
    ];

    /// Value used when the oracle has no entry for this key.
    pub const fn default_value(self) -> f64 {
        match self {
            Self::ApPerTurn => 3.0,
            Self::MaxAp => 10.0,
            Self::BaseApCap => 6.0,
            Self::TalentDivisor => 10.0,
            Self::MasteryStep => 0.25,
            Self::HpPerLevel => 10.0,
            Self::MpPerLevel => 5.0,
            Self::DefendShield => 10.0,
            Self::DefendDuration => 2.0,
        }
    }
}

/// Provides access to numeric combat configuration.
pub trait ConfigOracle: Send + Sync {
    /// Raw lookup. `None` means "use the default".
    fn value(&self, key: ConfigKey) -> Option<f64>;

    fn get(&self, key: ConfigKey) -> f64 {
        self.value(key).unwrap_or_else(|| key.default_value())
    }

    fn ap_per_turn(&self) -> i32 {
        self.get(ConfigKey::ApPerTurn) as i32
    }

    fn max_ap(&self) -> i32 {
        self.get(ConfigKey::MaxAp) as i32
    }

    /// AP a combatant starts the match with.
    fn starting_ap(&self) -> i32 {
        (self.get(ConfigKey::BaseApCap) as i32).min(self.max_ap())
    }

    fn talent_divisor(&self) -> f64 {
        let divisor = self.get(ConfigKey::TalentDivisor);
        if divisor == 0.0 {
            ConfigKey::TalentDivisor.default_value()
        } else {
            divisor
        }
    }

    fn mastery_step(&self) -> f64 {
        self.get(ConfigKey::MasteryStep)
    }

    fn hp_per_level(&self) -> i32 {
        self.get(ConfigKey::HpPerLevel) as i32
    }

    fn mp_per_level(&self) -> i32 {
        self.get(ConfigKey::MpPerLevel) as i32
    }

    fn defend_shield(&self) -> i32 {
        self.get(ConfigKey::DefendShield) as i32
    }

    fn defend_duration(&self) -> i32 {
        self.get(ConfigKey::DefendDuration) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl ConfigOracle for Empty {
        fn value(&self, _key: ConfigKey) -> Option<f64> {
            None
        }
    }

    struct Overrides;

    impl ConfigOracle for Overrides {
        fn value(&self, key: ConfigKey) -> Option<f64> {
            match key {
                ConfigKey::MaxAp => Some(4.0),
                ConfigKey::TalentDivisor => Some(0.0),
                _ => None,
            }
        }
    }

    #[test]
    fn missing_keys_use_defaults() {
        assert_eq!(Empty.ap_per_turn(), 3);
        assert_eq!(Empty.starting_ap(), 6);
        assert_eq!(Empty.mastery_step(), 0.25);
    }

    #[test]
    fn starting_ap_never_exceeds_max() {
        assert_eq!(Overrides.starting_ap(), 4);
        assert_eq!(Overrides.talent_divisor(), 10.0);
    }

    #[test]
    fn keys_use_snake_case_names() {
        assert_eq!(ConfigKey::BaseApCap.to_string(), "base_ap_cap");
        assert_eq!("defend_shield".parse::<ConfigKey>(), Ok(ConfigKey::DefendShield));
    }
}
