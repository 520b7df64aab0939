use std::collections::BTreeMap;

use crate::state::ElementId;

pub trait RecipeOracle: Send + Sync {
    /// Recipe producing `output`, or `None` for primitive elements.
    fn recipe(&self, output: ElementId) -> Option<Recipe>;
}

/// Composite element definition. Combat only reads recipes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub output: ElementId,
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeIngredient {
    pub element: ElementId,
    pub quantity: u32,
}

impl Recipe {
    pub fn new(output: ElementId, ingredients: impl IntoIterator<Item = (ElementId, u32)>) -> Self {
        Self {
            output,
            ingredients: ingredients
                .into_iter()
                .map(|(element, quantity)| RecipeIngredient { element, quantity })
                .collect(),
        }
    }

    pub fn total(&self) -> u32 {
        self.ingredients.iter().map(|i| i.quantity).sum()
    }

    /// Ingredient multiset with duplicate rows merged.
    pub fn counts(&self) -> BTreeMap<ElementId, u32> {
        let mut counts = BTreeMap::new();
        for ingredient in &self.ingredients {
            *counts.entry(ingredient.element).or_insert(0) += ingredient.quantity;
        }
        counts
    }

    /// Distinct ingredient elements in ascending id order.
    pub fn distinct_elements(&self) -> Vec<ElementId> {
        self.counts().into_keys().collect()
    }

    /// Element whose quantity is strictly more than half the total.
    pub fn majority(&self) -> Option<ElementId> {
        let total = self.total();
        self.counts()
            .into_iter()
            .find(|(_, quantity)| quantity * 2 > total)
            .map(|(element, _)| element)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.ingredients.iter().any(|i| i.element == element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_requires_strictly_more_than_half() {
        let even = Recipe::new(ElementId(10), [(ElementId(1), 2), (ElementId(2), 2)]);
        assert_eq!(even.majority(), None);

        let heavy = Recipe::new(ElementId(10), [(ElementId(1), 3), (ElementId(2), 2)]);
        assert_eq!(heavy.majority(), Some(ElementId(1)));
    }

    #[test]
    fn duplicate_rows_are_merged() {
        let recipe = Recipe::new(
            ElementId(10),
            [(ElementId(3), 1), (ElementId(1), 1), (ElementId(3), 1)],
        );
        assert_eq!(recipe.majority(), Some(ElementId(3)));
        assert_eq!(recipe.distinct_elements(), vec![ElementId(1), ElementId(3)]);
    }
}
