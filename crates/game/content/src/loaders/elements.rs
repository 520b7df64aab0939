//! Element recipe and matchup loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::Recipe;
use combat_core::env::ElementalMatchup;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Recipes and the elemental advantage table, stored together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementTables {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub matchups: Vec<ElementalMatchup>,
}

pub struct ElementLoader;

impl ElementLoader {
    pub fn load(path: &Path) -> LoadResult<ElementTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Rejects empty recipes, zero quantities, duplicate outputs and
    /// non-positive multipliers.
    pub fn parse(content: &str) -> LoadResult<ElementTables> {
        let tables: ElementTables = parse_ron(content, "element tables")?;

        let mut outputs = BTreeSet::new();
        for recipe in &tables.recipes {
            if !outputs.insert(recipe.output) {
                anyhow::bail!("Duplicate recipe for element {}", recipe.output);
            }
            if recipe.ingredients.is_empty() || recipe.ingredients.iter().any(|i| i.quantity == 0) {
                anyhow::bail!("Recipe for element {} has no usable ingredients", recipe.output);
            }
        }
        for matchup in &tables.matchups {
            if matchup.multiplier <= 0.0 {
                anyhow::bail!(
                    "Matchup {} -> {} has non-positive multiplier {}",
                    matchup.attacker,
                    matchup.defender,
                    matchup.multiplier
                );
            }
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::ElementId;

    #[test]
    fn parses_recipes_and_matchups() {
        let tables = ElementLoader::parse(
            r#"(
                recipes: [(output: 10, ingredients: [(element: 1, quantity: 1), (element: 2, quantity: 1)])],
                matchups: [(attacker: 2, defender: 1, multiplier: 1.5)],
            )"#,
        )
        .expect("tables");

        assert_eq!(tables.recipes[0].distinct_elements(), vec![ElementId(1), ElementId(2)]);
        assert_eq!(tables.matchups[0].multiplier, 1.5);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = ElementLoader::parse(
            r#"(recipes: [(output: 10, ingredients: [(element: 1, quantity: 0)])])"#,
        );
        assert!(result.is_err());
    }
}
