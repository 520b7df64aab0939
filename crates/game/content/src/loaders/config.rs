//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Omitted keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_ap <= 0 {
            anyhow::bail!("max_ap must be positive, got {}", config.max_ap);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_keys_keep_defaults() {
        let config = ConfigLoader::parse("ap_per_turn = 4\n").expect("config");
        assert_eq!(config.ap_per_turn, 4);
        assert_eq!(config.max_ap, CombatConfig::default().max_ap);
        assert_eq!(config.casting_modes, CombatConfig::default().casting_modes);
    }

    #[test]
    fn casting_modes_are_tunable() {
        let config = ConfigLoader::parse(
            "[casting_modes.focused]\npower = 2.0\nap_delta = 2\nmp_delta = 1\n",
        )
        .expect("config");
        assert_eq!(config.casting_modes.focused.power, 2.0);
        assert_eq!(config.casting_modes.focused.mp_delta, 1);
    }

    #[test]
    fn non_positive_max_ap_is_rejected() {
        assert!(ConfigLoader::parse("max_ap = 0\n").is_err());
    }
}
