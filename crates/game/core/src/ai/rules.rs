use crate::state::{AbilityId, EnemyId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiCondition {
    Always,
    /// HP percent below the rule value.
    SelfHpBelow,
    SelfHpAbove,
    TargetHpBelow,
    TargetHpAbove,
    SelfHasBuff,
    SelfHasDebuff,
    TargetHasBuff,
    TargetHasDebuff,
    /// Turn number equals the rule value.
    TurnIs,
    TurnIsEven,
    TurnIsOdd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiAction {
    UseAbility,
    /// Gain the configured defend shield.
    Defend,
    Pass,
    /// Reported only; the combatant stays in the match.
    Flee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSelector {
    #[strum(serialize = "Self")]
    #[cfg_attr(feature = "serde", serde(rename = "Self"))]
    SelfTarget,
    /// First living player combatant.
    Player,
    PlayerLowestHp,
    /// First living NPC other than the actor.
    Ally,
    /// Lowest-HP living NPC, actor included.
    AllyLowestHp,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiRule {
    pub enemy: EnemyId,
    /// Lower numbers are evaluated first.
    pub priority: i32,
    pub condition: AiCondition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: f64,
    pub action: AiAction,
    pub target: TargetSelector,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability: Option<AbilityId>,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AiRuleError {
    #[error("rule set is empty")]
    Empty,

    #[error("rule set needs exactly one Always rule, found {0}")]
    AlwaysCount(usize),

    #[error("Always rule at priority {always} must have the strictly highest priority (found {highest})")]
    AlwaysNotLast { always: i32, highest: i32 },

    #[error("UseAbility rule at priority {0} has no ability")]
    MissingAbility(i32),

    #[error("rule at priority {priority} belongs to enemy {found}, expected {expected}")]
    ForeignRule {
        priority: i32,
        expected: EnemyId,
        found: EnemyId,
    },
}

/// Validated rules of one enemy, sorted by ascending priority.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<AiRule>", into = "Vec<AiRule>")
)]
pub struct AiRuleSet {
    rules: Vec<AiRule>,
}

impl AiRuleSet {
    /// Validates and sorts `rules`.
    ///
    /// # Errors
    ///
    /// - no rules, or rules owned by more than one enemy
    /// - zero or several `Always` rules
    /// - the `Always` rule not strictly last by priority
    /// - a `UseAbility` rule without an ability id
    pub fn new(mut rules: Vec<AiRule>) -> Result<Self, AiRuleError> {
        let enemy = rules.first().ok_or(AiRuleError::Empty)?.enemy;
        if let Some(foreign) = rules.iter().find(|r| r.enemy != enemy) {
            return Err(AiRuleError::ForeignRule {
                priority: foreign.priority,
                expected: enemy,
                found: foreign.enemy,
            });
        }

        let always: Vec<&AiRule> = rules
            .iter()
            .filter(|r| r.condition == AiCondition::Always)
            .collect();
        let [always] = always.as_slice() else {
            return Err(AiRuleError::AlwaysCount(always.len()));
        };
        if let Some(other) = rules
            .iter()
            .filter(|r| r.condition != AiCondition::Always)
            .map(|r| r.priority)
            .max()
            && other >= always.priority
        {
            return Err(AiRuleError::AlwaysNotLast {
                always: always.priority,
                highest: other,
            });
        }

        if let Some(rule) = rules
            .iter()
            .find(|r| r.action == AiAction::UseAbility && r.ability.is_none())
        {
            return Err(AiRuleError::MissingAbility(rule.priority));
        }

        rules.sort_by_key(|r| r.priority);
        Ok(Self { rules })
    }

    pub fn enemy(&self) -> EnemyId {
        // Never empty after validation.
        self.rules.first().map_or_else(EnemyId::default, |r| r.enemy)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AiRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TryFrom<Vec<AiRule>> for AiRuleSet {
    type Error = AiRuleError;

    fn try_from(rules: Vec<AiRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<AiRuleSet> for Vec<AiRule> {
    fn from(set: AiRuleSet) -> Self {
        set.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(priority: i32, condition: AiCondition, action: AiAction) -> AiRule {
        AiRule {
            enemy: EnemyId(1),
            priority,
            condition,
            value: 0.0,
            action,
            target: TargetSelector::Player,
            ability: (action == AiAction::UseAbility).then_some(AbilityId(1)),
        }
    }

    #[test]
    fn valid_set_is_sorted() {
        let set = AiRuleSet::new(vec![
            rule(10, AiCondition::Always, AiAction::UseAbility),
            rule(1, AiCondition::SelfHpBelow, AiAction::Defend),
        ])
        .expect("valid rule set");

        let priorities: Vec<i32> = set.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 10]);
        assert_eq!(set.enemy(), EnemyId(1));
    }

    #[test]
    fn missing_always_is_rejected() {
        let err = AiRuleSet::new(vec![rule(1, AiCondition::TurnIsOdd, AiAction::Pass)]);
        assert_eq!(err, Err(AiRuleError::AlwaysCount(0)));
    }

    #[test]
    fn always_must_be_strictly_last() {
        let err = AiRuleSet::new(vec![
            rule(5, AiCondition::Always, AiAction::Pass),
            rule(5, AiCondition::TurnIsEven, AiAction::Pass),
        ]);
        assert_eq!(
            err,
            Err(AiRuleError::AlwaysNotLast {
                always: 5,
                highest: 5
            })
        );
    }

    #[test]
    fn use_ability_needs_an_ability() {
        let mut broken = rule(1, AiCondition::TurnIs, AiAction::UseAbility);
        broken.ability = None;
        let err = AiRuleSet::new(vec![broken, rule(2, AiCondition::Always, AiAction::Pass)]);
        assert_eq!(err, Err(AiRuleError::MissingAbility(1)));
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(AiRuleSet::new(Vec::new()), Err(AiRuleError::Empty));
    }
}
