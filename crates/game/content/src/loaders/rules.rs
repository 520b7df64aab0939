//! AI rule loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{AiRule, AiRuleSet, EnemyId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleCatalog {
    rules: Vec<AiRule>,
}

/// Loader for AI rules. Rules are stored flat and grouped per enemy.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<EnemyId, AiRuleSet>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Groups rules by enemy and validates each group.
    pub fn parse(content: &str) -> LoadResult<BTreeMap<EnemyId, AiRuleSet>> {
        let catalog: RuleCatalog = parse_ron(content, "AI rules")?;

        let mut grouped: BTreeMap<EnemyId, Vec<AiRule>> = BTreeMap::new();
        for rule in catalog.rules {
            grouped.entry(rule.enemy).or_default().push(rule);
        }

        grouped
            .into_iter()
            .map(|(enemy, rules)| {
                let set = AiRuleSet::new(rules)
                    .map_err(|e| anyhow::anyhow!("Invalid AI rules for enemy {}: {}", enemy, e))?;
                Ok((enemy, set))
            })
            .collect()
    }
}
