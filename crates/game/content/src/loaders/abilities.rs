//! NPC ability loader.
//!
//! Ability effect lists are stored as JSON payloads inside the RON records.
//! They are decoded once here into [`SpellEffect`]s so the engine never
//! sees raw JSON.

use std::path::Path;

use combat_core::{AbilityId, ElementId, NpcAbility, SpellEffect, TargetType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Ability as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub id: AbilityId,
    pub name: String,
    pub element: ElementId,
    #[serde(default)]
    pub ap_cost: i32,
    #[serde(default)]
    pub mp_cost: i32,
    pub target: TargetType,
    /// JSON array of effect entries.
    pub effects: String,
}

impl AbilityRecord {
    /// Decodes the JSON effect payload.
    pub fn decode(self) -> LoadResult<NpcAbility> {
        let effects: Vec<SpellEffect> = serde_json::from_str(&self.effects).map_err(|e| {
            anyhow::anyhow!(
                "Failed to decode effects of ability {} ({}): {}",
                self.id,
                self.name,
                e
            )
        })?;

        Ok(NpcAbility {
            id: self.id,
            name: self.name,
            element: self.element,
            ap_cost: self.ap_cost,
            mp_cost: self.mp_cost,
            target: self.target,
            effects,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AbilityCatalog {
    abilities: Vec<AbilityRecord>,
}

pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<NpcAbility>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<NpcAbility>> {
        let catalog: AbilityCatalog = parse_ron(content, "ability catalog")?;
        catalog
            .abilities
            .into_iter()
            .map(AbilityRecord::decode)
            .collect()
    }
}
