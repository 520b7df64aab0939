//! Effect value calculation.
//!
//! `initial = base × mastery_multiplier + talent_bonus`

use crate::env::RecipeOracle;
use crate::state::{Combatant, ElementId, Mastery};

/// `1 + (mastery − 1) × step`. Mastery 0 and 1 are both the baseline.
pub fn mastery_multiplier(mastery: Mastery, step: f64) -> f64 {
    let above_base = f64::from(mastery.0.saturating_sub(1));
    1.0 + above_base * step
}

/// Flat bonus added after mastery scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TalentBonus {
    pub value: f64,
    /// Set when the element has three or more distinct ingredients; the
    /// summation rule for those is not final.
    pub provisional: bool,
    pub ingredients: usize,
}

/// Talent bonus of `caster` for a spell of `element`.
///
/// Primitive elements use the caster's talent in that element. Composite
/// elements sum the talent of every distinct ingredient.
pub fn talent_bonus(
    caster: &Combatant,
    element: ElementId,
    recipes: &(impl RecipeOracle + ?Sized),
    divisor: f64,
) -> TalentBonus {
    if element.is_none() {
        return TalentBonus::default();
    }
    let Some(recipe) = recipes.recipe(element) else {
        return TalentBonus {
            value: f64::from(caster.talent(element)) / divisor,
            provisional: false,
            ingredients: 1,
        };
    };

    let elements = recipe.distinct_elements();
    let value = elements
        .iter()
        .map(|&e| f64::from(caster.talent(e)) / divisor)
        .sum();
    TalentBonus {
        value,
        provisional: elements.len() >= 3,
        ingredients: elements.len(),
    }
}

pub fn initial_value(base: f64, mastery: Mastery, step: f64, talent: &TalentBonus) -> f64 {
    base * mastery_multiplier(mastery, step) + talent.value
}
