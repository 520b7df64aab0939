//! Spell resolver.
//!
//! Maps a desired (element, mastery) pair to a castable spell. When the exact
//! pair is not authored and the element is a composite, the resolver degrades
//! through a fixed chain of fallbacks, each retrying a direct lookup with a
//! different element at the same mastery:
//!
//! 1. direct lookup
//! 2. majority ingredient (quantity > half the total)
//! 3. caster's main element, when it is one of the ingredients
//! 4. round-robin tournament winner among the distinct ingredients
//! 5. ingredient with the best advantage over the caster's element
//!
//! Iteration is over id-sorted ingredient lists only, so the result is fully
//! deterministic.

use crate::env::{MatchupOracle, Recipe, RecipeOracle, Spell, SpellOracle};
use crate::error::{CombatError, Result};
use crate::state::{ElementId, Mastery};

use super::elemental_modifier;

/// Which link of the fallback chain produced the spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionStep {
    Direct,
    Majority,
    Insider,
    Tournament,
    CasterAffinity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSpell {
    pub spell: Spell,
    pub step: ResolutionStep,
}

/// Resolves `(element, mastery)` for a caster whose main element is `caster_element`.
///
/// # Errors
///
/// Returns `CombatError::SpellNotFound` when every step is exhausted, or
/// immediately after step 1 when `element` has no recipe.
pub fn resolve_spell(
    spells: &(impl SpellOracle + ?Sized),
    recipes: &(impl RecipeOracle + ?Sized),
    matchups: &(impl MatchupOracle + ?Sized),
    element: ElementId,
    mastery: Mastery,
    caster_element: ElementId,
) -> Result<ResolvedSpell> {
    let not_found = || CombatError::SpellNotFound { element, mastery };
    let found = |spell: Spell, step: ResolutionStep| {
        tracing::debug!(
            target: "combat::resolver",
            element = element.0,
            mastery = mastery.0,
            spell = spell.id.0,
            %step,
            "spell resolved"
        );
        Ok(ResolvedSpell { spell, step })
    };

    if let Some(spell) = spells.spell_for(element, mastery) {
        return found(spell, ResolutionStep::Direct);
    }

    let Some(recipe) = recipes.recipe(element) else {
        return Err(not_found());
    };

    if let Some(spell) = majority_element(&recipe).and_then(|e| spells.spell_for(e, mastery)) {
        return found(spell, ResolutionStep::Majority);
    }

    if let Some(spell) =
        insider_element(&recipe, caster_element).and_then(|e| spells.spell_for(e, mastery))
    {
        return found(spell, ResolutionStep::Insider);
    }

    let elements = recipe.distinct_elements();

    if let Some(spell) =
        tournament_winner(&elements, matchups).and_then(|e| spells.spell_for(e, mastery))
    {
        return found(spell, ResolutionStep::Tournament);
    }

    if let Some(spell) = caster_affinity_pick(&elements, caster_element, matchups)
        .and_then(|e| spells.spell_for(e, mastery))
    {
        return found(spell, ResolutionStep::CasterAffinity);
    }

    tracing::debug!(
        target: "combat::resolver",
        element = element.0,
        mastery = mastery.0,
        "fallback chain exhausted"
    );
    Err(not_found())
}

/// Step 2: the ingredient holding a strict majority of the total quantity.
pub fn majority_element(recipe: &Recipe) -> Option<ElementId> {
    recipe.majority()
}

/// Step 3: the caster's own element, if it is an ingredient.
pub fn insider_element(recipe: &Recipe, caster_element: ElementId) -> Option<ElementId> {
    (!caster_element.is_none() && recipe.contains(caster_element)).then_some(caster_element)
}

/// Step 4: every ordered pair (A, B) with A ≠ B where A beats B (> 1.0)
/// scores A a point. Only a single strict leader wins.
///
/// `elements` must be distinct and sorted ascending.
pub fn tournament_winner(
    elements: &[ElementId],
    matchups: &(impl MatchupOracle + ?Sized),
) -> Option<ElementId> {
    let scores: Vec<(ElementId, u32)> = elements
        .iter()
        .map(|&a| {
            let points = elements
                .iter()
                .filter(|&&b| a != b && elemental_modifier(matchups, a, b) > 1.0)
                .count() as u32;
            (a, points)
        })
        .collect();

    let best = scores.iter().map(|(_, p)| *p).max()?;
    let mut leaders = scores.iter().filter(|(_, p)| *p == best);
    let (winner, _) = leaders.next()?;
    match leaders.next() {
        Some(_) => None,
        None => Some(*winner),
    }
}

/// Step 5: score each ingredient attacking the caster's element
/// (> 1.0 → +1, < 1.0 → −1, = 1.0 → 0). Highest score wins; ties go to
/// the first element in sorted order.
pub fn caster_affinity_pick(
    elements: &[ElementId],
    caster_element: ElementId,
    matchups: &(impl MatchupOracle + ?Sized),
) -> Option<ElementId> {
    let mut best: Option<(ElementId, i32)> = None;
    for &element in elements {
        let modifier = elemental_modifier(matchups, element, caster_element);
        let score = if modifier > 1.0 {
            1
        } else if modifier < 1.0 {
            -1
        } else {
            0
        };
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((element, score));
        }
    }
    best.map(|(element, _)| element)
}
