use std::collections::BTreeMap;

use crate::env::{CharacterTemplate, ConfigOracle, EnemyTemplate};

use super::{CharacterId, CombatantId, EffectId, ElementId, EnemyId, StatusSet};

/// Who a combatant stands for. Exactly one of the two, never neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantRef {
    Player(CharacterId),
    Npc(EnemyId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// One composite-element card brought into the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charge {
    pub element: ElementId,
    pub consumed: bool,
}

/// Damage absorption pool. Expires with the combatant's own turn count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldPool {
    pub amount: i32,
    pub remaining_turns: i32,
    pub source: EffectId,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub identity: CombatantRef,
    pub name: String,
    /// Main element, may be [`ElementId::NONE`].
    pub element: ElementId,
    pub level: u32,
    pub initiative: i32,
    pub base_hp: i32,
    pub base_mp: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub ap: i32,
    pub talents: BTreeMap<ElementId, i32>,
    pub charges: Vec<Charge>,
    pub statuses: StatusSet,
    pub shield: Option<ShieldPool>,
}

impl Combatant {
    /// Builds a player combatant at full HP/MP.
    pub fn from_character(
        id: CombatantId,
        template: &CharacterTemplate,
        config: &dyn ConfigOracle,
    ) -> Self {
        Self::fresh(
            id,
            CombatantRef::Player(template.id),
            template.name.clone(),
            template.element,
            template.level,
            template.initiative,
            (template.base_hp, template.base_mp),
            template.talents.clone(),
            config,
        )
    }

    pub fn from_enemy(id: CombatantId, template: &EnemyTemplate, config: &dyn ConfigOracle) -> Self {
        Self::fresh(
            id,
            CombatantRef::Npc(template.id),
            template.name.clone(),
            template.element,
            template.level,
            template.initiative,
            (template.base_hp, template.base_mp),
            template.talents.clone(),
            config,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn fresh(
        id: CombatantId,
        identity: CombatantRef,
        name: String,
        element: ElementId,
        level: u32,
        initiative: i32,
        (base_hp, base_mp): (i32, i32),
        talents: BTreeMap<ElementId, i32>,
        config: &dyn ConfigOracle,
    ) -> Self {
        let mut combatant = Self {
            id,
            identity,
            name,
            element,
            level,
            initiative,
            base_hp,
            base_mp,
            hp: 0,
            max_hp: 0,
            mp: 0,
            max_mp: 0,
            ap: config.starting_ap(),
            talents,
            charges: Vec::new(),
            statuses: StatusSet::new(),
            shield: None,
        };
        combatant.recalculate_maximums(config);
        combatant.hp = combatant.max_hp;
        combatant.mp = combatant.max_mp;
        combatant
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_player(&self) -> bool {
        matches!(self.identity, CombatantRef::Player(_))
    }

    pub fn team(&self) -> Team {
        match self.identity {
            CombatantRef::Player(_) => Team::Player,
            CombatantRef::Npc(_) => Team::Enemy,
        }
    }

    pub fn enemy_id(&self) -> Option<EnemyId> {
        match self.identity {
            CombatantRef::Npc(id) => Some(id),
            CombatantRef::Player(_) => None,
        }
    }

    /// Talent points for an element; untrained elements count as zero.
    pub fn talent(&self, element: ElementId) -> i32 {
        self.talents.get(&element).copied().unwrap_or(0)
    }

    pub fn hp_percent(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        f64::from(self.hp) * 100.0 / f64::from(self.max_hp)
    }

    pub fn shield_amount(&self) -> i32 {
        self.shield.map_or(0, |s| s.amount)
    }

    pub fn has_charge(&self, element: ElementId) -> bool {
        self.charges.iter().any(|c| c.element == element && !c.consumed)
    }

    /// Marks exactly one unconsumed charge of `element` consumed.
    pub fn consume_charge(&mut self, element: ElementId) -> bool {
        match self
            .charges
            .iter_mut()
            .find(|c| c.element == element && !c.consumed)
        {
            Some(charge) => {
                charge.consumed = true;
                true
            }
            None => false,
        }
    }

    /// Adds to the shield pool; expiry becomes the later of the two.
    pub fn add_shield(&mut self, amount: i32, duration: i32, source: EffectId) {
        match &mut self.shield {
            Some(pool) => {
                pool.amount += amount;
                pool.remaining_turns = pool.remaining_turns.max(duration);
                pool.source = source;
            }
            None => {
                self.shield = Some(ShieldPool {
                    amount,
                    remaining_turns: duration,
                    source,
                });
            }
        }
    }

    /// Drains up to `damage` from the shield and returns the absorbed amount.
    pub fn absorb(&mut self, damage: i32) -> i32 {
        let Some(pool) = &mut self.shield else {
            return 0;
        };
        let absorbed = pool.amount.min(damage).max(0);
        pool.amount -= absorbed;
        if pool.amount <= 0 {
            self.shield = None;
        }
        absorbed
    }

    /// Lowers HP, never below zero. Returns the HP actually lost.
    pub fn lose_hp(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.hp.max(0));
        self.hp -= lost;
        lost
    }

    /// Raises HP up to max. Returns the HP actually restored.
    pub fn restore_hp(&mut self, amount: i32) -> i32 {
        let restored = amount.clamp(0, (self.max_hp - self.hp).max(0));
        self.hp += restored;
        restored
    }

    /// Recomputes max HP/MP from level and clamps the current pools.
    ///
    /// `max = base + per_level × (level − 1)`
    pub fn recalculate_maximums(&mut self, config: &dyn ConfigOracle) {
        let levels = self.level.saturating_sub(1) as i32;
        self.max_hp = (self.base_hp + config.hp_per_level() * levels).max(1);
        self.max_mp = (self.base_mp + config.mp_per_level() * levels).max(0);
        self.hp = self.hp.min(self.max_hp);
        self.mp = self.mp.min(self.max_mp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::state::PlayerId;

    fn template() -> CharacterTemplate {
        CharacterTemplate {
            id: CharacterId(7),
            owner: PlayerId(1),
            name: "Aria".into(),
            element: ElementId(1),
            level: 3,
            base_hp: 100,
            base_mp: 40,
            initiative: 5,
            talents: BTreeMap::from([(ElementId(1), 20)]),
        }
    }

    #[test]
    fn character_starts_full_with_level_scaling() {
        let config = CombatConfig::default();
        let combatant = Combatant::from_character(CombatantId(0), &template(), &config);

        assert_eq!(combatant.max_hp, 120);
        assert_eq!(combatant.hp, 120);
        assert_eq!(combatant.max_mp, 50);
        assert_eq!(combatant.ap, 6);
        assert_eq!(combatant.team(), Team::Player);
        assert_eq!(combatant.talent(ElementId(2)), 0);
    }

    #[test]
    fn shield_absorbs_before_clearing() {
        let config = CombatConfig::default();
        let mut combatant = Combatant::from_character(CombatantId(0), &template(), &config);
        combatant.add_shield(10, 2, EffectId(4));
        combatant.add_shield(5, 1, EffectId(4));

        assert_eq!(combatant.shield.map(|s| s.remaining_turns), Some(2));
        assert_eq!(combatant.absorb(12), 12);
        assert_eq!(combatant.shield_amount(), 3);
        assert_eq!(combatant.absorb(8), 3);
        assert!(combatant.shield.is_none());
    }

    #[test]
    fn consume_charge_marks_exactly_one() {
        let config = CombatConfig::default();
        let mut combatant = Combatant::from_character(CombatantId(0), &template(), &config);
        combatant.charges = vec![
            Charge { element: ElementId(10), consumed: false },
            Charge { element: ElementId(10), consumed: false },
        ];

        assert!(combatant.consume_charge(ElementId(10)));
        assert_eq!(combatant.charges.iter().filter(|c| c.consumed).count(), 1);
        assert!(combatant.has_charge(ElementId(10)));
        assert!(!combatant.consume_charge(ElementId(11)));
    }
}
