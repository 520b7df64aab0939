use crate::state::{AbilityId, CombatMatch, Combatant, CombatantId, Team};

use super::{AiAction, AiCondition, AiRule, AiRuleSet, TargetSelector};

/// Move chosen for an NPC.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiDecision {
    /// Priority of the rule that fired, `None` for the fallback pass.
    pub priority: Option<i32>,
    pub action: AiAction,
    pub target: Option<CombatantId>,
    pub ability: Option<AbilityId>,
}

impl AiDecision {
    pub const PASS: Self = Self {
        priority: None,
        action: AiAction::Pass,
        target: None,
        ability: None,
    };
}

/// Picks the first rule, in ascending priority, whose target resolves and
/// whose condition holds.
pub fn decide(combat: &CombatMatch, actor: CombatantId, rules: &AiRuleSet) -> AiDecision {
    let Some(me) = combat.combatant(actor) else {
        return AiDecision::PASS;
    };

    for rule in rules.iter() {
        let Some(target_id) = resolve_target(combat, me, rule.target) else {
            tracing::debug!(
                target: "combat::ai",
                actor = actor.0,
                priority = rule.priority,
                selector = %rule.target,
                "rule skipped, no target"
            );
            continue;
        };
        let target = combat.combatant(target_id);
        if condition_holds(rule, combat, me, target) {
            return AiDecision {
                priority: Some(rule.priority),
                action: rule.action,
                target: Some(target_id),
                ability: rule.ability,
            };
        }
    }

    AiDecision::PASS
}

/// Resolves a selector relative to `actor`. Only living combatants qualify.
pub fn resolve_target(
    combat: &CombatMatch,
    actor: &Combatant,
    selector: TargetSelector,
) -> Option<CombatantId> {
    let lowest_hp = |team: Team| {
        combat
            .living(team)
            .min_by_key(|c| (c.hp, c.id))
            .map(|c| c.id)
    };

    match selector {
        TargetSelector::SelfTarget => actor.is_alive().then_some(actor.id),
        TargetSelector::Player => combat.living(Team::Player).next().map(|c| c.id),
        TargetSelector::PlayerLowestHp => lowest_hp(Team::Player),
        TargetSelector::Ally => combat
            .living(actor.team())
            .find(|c| c.id != actor.id)
            .map(|c| c.id),
        TargetSelector::AllyLowestHp => lowest_hp(actor.team()),
    }
}

fn condition_holds(
    rule: &AiRule,
    combat: &CombatMatch,
    me: &Combatant,
    target: Option<&Combatant>,
) -> bool {
    let target_check = |check: fn(&Combatant, f64) -> bool| target.is_some_and(|t| check(t, rule.value));

    match rule.condition {
        AiCondition::Always => true,
        AiCondition::SelfHpBelow => me.hp_percent() < rule.value,
        AiCondition::SelfHpAbove => me.hp_percent() > rule.value,
        AiCondition::TargetHpBelow => target_check(|t, v| t.hp_percent() < v),
        AiCondition::TargetHpAbove => target_check(|t, v| t.hp_percent() > v),
        AiCondition::SelfHasBuff => me.statuses.has_buff(),
        AiCondition::SelfHasDebuff => me.statuses.has_debuff(),
        AiCondition::TargetHasBuff => target_check(|t, _| t.statuses.has_buff()),
        AiCondition::TargetHasDebuff => target_check(|t, _| t.statuses.has_debuff()),
        AiCondition::TurnIs => f64::from(combat.turn_number) == rule.value,
        AiCondition::TurnIsEven => combat.turn_number % 2 == 0,
        AiCondition::TurnIsOdd => combat.turn_number % 2 == 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AbilityId, EnemyId};
    use crate::testing;

    fn rule(priority: i32, condition: AiCondition, value: f64, action: AiAction, target: TargetSelector) -> AiRule {
        AiRule {
            enemy: EnemyId(1),
            priority,
            condition,
            value,
            action,
            target,
            ability: (action == AiAction::UseAbility).then_some(AbilityId(1)),
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        let mut combat = testing::duel();
        combat.combatants[1].hp = 5;
        let rules = AiRuleSet::new(vec![
            rule(1, AiCondition::SelfHpBelow, 30.0, AiAction::Defend, TargetSelector::SelfTarget),
            rule(9, AiCondition::Always, 0.0, AiAction::UseAbility, TargetSelector::Player),
        ])
        .expect("rules");

        let decision = decide(&combat, CombatantId(1), &rules);
        assert_eq!(decision.action, AiAction::Defend);
        assert_eq!(decision.target, Some(CombatantId(1)));
        assert_eq!(decision.priority, Some(1));
    }

    #[test]
    fn lowest_priority_number_wins_regardless_of_declaration_order() {
        let mut combat = testing::duel();
        combat.combatants[1].hp = 5;
        let rules = AiRuleSet::new(vec![
            rule(99, AiCondition::Always, 0.0, AiAction::UseAbility, TargetSelector::Player),
            rule(1, AiCondition::SelfHpBelow, 30.0, AiAction::Defend, TargetSelector::SelfTarget),
        ])
        .expect("rules");

        for _ in 0..3 {
            let decision = decide(&combat, CombatantId(1), &rules);
            assert_eq!(decision.priority, Some(1));
            assert_eq!(decision.action, AiAction::Defend);
        }
    }

    #[test]
    fn falls_through_to_always() {
        let combat = testing::duel();
        let rules = AiRuleSet::new(vec![
            rule(1, AiCondition::TurnIsEven, 0.0, AiAction::Flee, TargetSelector::SelfTarget),
            rule(9, AiCondition::Always, 0.0, AiAction::UseAbility, TargetSelector::Player),
        ])
        .expect("rules");

        let decision = decide(&combat, CombatantId(1), &rules);
        assert_eq!(decision.action, AiAction::UseAbility);
        assert_eq!(decision.target, Some(CombatantId(0)));
        assert_eq!(decision.ability, Some(AbilityId(1)));
    }

    #[test]
    fn unresolvable_target_skips_rule() {
        // Lone enemy: no ally to heal.
        let combat = testing::duel();
        let rules = AiRuleSet::new(vec![
            rule(1, AiCondition::TargetHpBelow, 100.0, AiAction::UseAbility, TargetSelector::Ally),
            rule(2, AiCondition::Always, 0.0, AiAction::Pass, TargetSelector::Player),
        ])
        .expect("rules");

        let decision = decide(&combat, CombatantId(1), &rules);
        assert_eq!(decision.action, AiAction::Pass);
        assert_eq!(decision.priority, Some(2));
    }

    #[test]
    fn lowest_hp_selectors_skip_the_defeated() {
        let mut combat = testing::skirmish();
        combat.combatants[1].hp = 0;
        combat.combatants[2].hp = 3;

        let me = combat.combatants[2].clone();
        assert_eq!(
            resolve_target(&combat, &me, TargetSelector::AllyLowestHp),
            Some(CombatantId(2))
        );
        assert_eq!(resolve_target(&combat, &me, TargetSelector::Ally), None);
        assert_eq!(
            resolve_target(&combat, &me, TargetSelector::PlayerLowestHp),
            Some(CombatantId(0))
        );
    }
}
