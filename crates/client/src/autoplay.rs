//! Scripted player policy used by `combat-sim play`.

use combat_core::{
    Action, CastingMode, CatalogSnapshot, CombatMatch, Combatant, CombatantId, Spell, TargetType,
};

/// Picks the next action for the player holding the turn.
///
/// Heals with the best affordable ally spell below 40% HP, otherwise casts
/// the affordable offensive spell with the highest mastery at the weakest
/// living enemy. Ends the turn when nothing is affordable.
pub fn choose_action(combat: &CombatMatch, catalog: &CatalogSnapshot) -> Action {
    let Some(hero) = combat.combatant(combat.current).filter(|c| c.is_player()) else {
        return Action::EndTurn;
    };

    let affordable = |spell: &&Spell| {
        spell.ap_cost <= hero.ap
            && spell.mp_cost <= hero.mp
            && (spell.element == hero.element || hero.talent(spell.element) > 0)
    };

    if hero.hp_percent() < 40.0
        && let Some(spell) = catalog
            .spells
            .values()
            .filter(affordable)
            .filter(|s| matches!(s.target, TargetType::Ally | TargetType::AllAllies))
            .max_by_key(|s| s.mastery)
    {
        return cast(spell, hero.id);
    }

    let Some(target) = weakest_enemy(combat) else {
        return Action::EndTurn;
    };

    catalog
        .spells
        .values()
        .filter(affordable)
        .filter(|s| matches!(s.target, TargetType::Enemy | TargetType::AllEnemies))
        .max_by_key(|s| (s.mastery, s.ap_cost))
        .map_or(Action::EndTurn, |spell| cast(spell, target))
}

fn cast(spell: &Spell, target: CombatantId) -> Action {
    Action::CastSpell {
        spell: spell.id,
        target,
        mode: CastingMode::default(),
    }
}

fn weakest_enemy(combat: &CombatMatch) -> Option<CombatantId> {
    combat
        .combatants
        .iter()
        .filter(|c| !c.is_player() && c.is_alive())
        .min_by_key(|c: &&Combatant| c.hp)
        .map(|c| c.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use combat_content::bundled_catalog;
    use combat_core::{
        CharacterId, CreateMatchRequest, EnemyId, MatchId, PlayerId, SpellId, create_match,
    };

    fn training(enemies: Vec<EnemyId>) -> (CombatMatch, CatalogSnapshot) {
        let catalog = bundled_catalog().expect("bundled content");
        let request = CreateMatchRequest::training(CharacterId(1), enemies);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("timestamp");
        let combat =
            create_match(&catalog.env(), PlayerId(1), MatchId(1), &request, now).expect("match");
        (combat, catalog)
    }

    #[test]
    fn casts_best_fire_spell_at_weakest_enemy() {
        let (mut combat, catalog) = training(vec![EnemyId(1), EnemyId(3)]);
        combat.combatants[0].ap = 10;
        combat.combatants[0].mp = 30;

        // Wisp (25 HP) is weaker than the goblin (40 HP).
        assert_eq!(
            choose_action(&combat, &catalog),
            Action::CastSpell {
                spell: SpellId(2),
                target: CombatantId(2),
                mode: CastingMode::default(),
            }
        );
    }

    #[test]
    fn ends_turn_without_ap() {
        let (mut combat, catalog) = training(vec![EnemyId(1)]);
        combat.combatants[0].ap = 1;

        assert_eq!(choose_action(&combat, &catalog), Action::EndTurn);
    }
}
