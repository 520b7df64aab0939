//! Match creation from roster templates.

use chrono::{DateTime, Utc};

use crate::config::CombatConfig;
use crate::env::{Deck, GameEnv};
use crate::error::{CombatError, Missing, Result};
use crate::state::{
    CharacterId, Charge, CombatMatch, Combatant, CombatantId, EnemyId, MatchId, MatchType,
    PlayerId, StageId,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateMatchRequest {
    pub match_type: MatchType,
    pub character: CharacterId,
    /// Stage lineup; takes precedence over `training_enemies`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stage: Option<StageId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub training_enemies: Vec<EnemyId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deck: Option<Deck>,
}

impl CreateMatchRequest {
    pub fn training(character: CharacterId, enemies: impl Into<Vec<EnemyId>>) -> Self {
        Self {
            match_type: MatchType::Training,
            character,
            stage: None,
            training_enemies: enemies.into(),
            deck: None,
        }
    }

    pub fn story(character: CharacterId, stage: StageId) -> Self {
        Self {
            match_type: MatchType::Story,
            character,
            stage: Some(stage),
            training_enemies: Vec::new(),
            deck: None,
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }
}

/// Builds a new in-progress match. The player's character always takes the
/// first turn; enemies follow in lineup order.
///
/// # Errors
///
/// - `NotFound` for unknown characters, stages or enemies
/// - `PermissionDenied` if `actor` does not own the character
/// - `Validation` for an empty or oversized lineup, or a deck card that is
///   not a composite element
pub fn create_match(
    env: &GameEnv<'_>,
    actor: PlayerId,
    id: MatchId,
    request: &CreateMatchRequest,
    now: DateTime<Utc>,
) -> Result<CombatMatch> {
    let roster = env.roster()?;
    let config = env.config()?;
    let recipes = env.recipes()?;

    let character = roster
        .character(request.character)
        .ok_or(CombatError::NotFound(Missing::Character(request.character)))?;
    if character.owner != actor {
        return Err(CombatError::permission_denied(format!(
            "player {actor} does not own character {}",
            character.id
        )));
    }

    let lineup = match request.stage {
        Some(stage_id) => {
            roster
                .stage(stage_id)
                .ok_or(CombatError::NotFound(Missing::Stage(stage_id)))?
                .enemies
        }
        None => request.training_enemies.clone(),
    };
    if lineup.is_empty() {
        return Err(CombatError::validation("match needs at least one enemy"));
    }
    if lineup.len() + 1 > CombatConfig::MAX_COMBATANTS {
        return Err(CombatError::validation(format!(
            "lineup of {} enemies exceeds the combatant limit of {}",
            lineup.len(),
            CombatConfig::MAX_COMBATANTS
        )));
    }

    let mut player = Combatant::from_character(CombatantId(0), &character, config);
    if let Some(deck) = &request.deck {
        for &card in &deck.cards {
            if recipes.recipe(card).is_none() {
                return Err(CombatError::validation(format!(
                    "deck card {card} is not a composite element"
                )));
            }
            player.charges.push(Charge {
                element: card,
                consumed: false,
            });
        }
    }

    let mut combatants = vec![player];
    for (index, enemy_id) in lineup.iter().enumerate() {
        let template = roster
            .enemy(*enemy_id)
            .ok_or(CombatError::NotFound(Missing::Enemy(*enemy_id)))?;
        combatants.push(Combatant::from_enemy(
            CombatantId(index as u32 + 1),
            &template,
            config,
        ));
    }

    let combat = CombatMatch::new(id, actor, request.match_type, combatants, now);
    tracing::info!(
        target: "combat::engine",
        match_id = id.0,
        player = actor.0,
        match_type = %combat.match_type,
        combatants = combat.combatants.len(),
        "match created"
    );
    Ok(combat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ElementId, MatchStatus, Team};
    use crate::testing::{self, CAVE, GOBLIN, HERO, OWNER, SHAMAN, STEAM};

    #[test]
    fn story_match_uses_stage_lineup() {
        let catalog = testing::catalog();
        let combat = create_match(
            &catalog.env(),
            OWNER,
            MatchId(5),
            &CreateMatchRequest::story(HERO, CAVE),
            testing::now(),
        )
        .expect("match created");

        assert_eq!(combat.status, MatchStatus::InProgress);
        assert_eq!(combat.turn_number, 1);
        assert_eq!(combat.current, CombatantId(0));
        let teams: Vec<Team> = combat.combatants.iter().map(|c| c.team()).collect();
        assert_eq!(teams, vec![Team::Player, Team::Enemy, Team::Enemy]);
        assert_eq!(combat.combatants[2].enemy_id(), Some(SHAMAN));
        assert_eq!(combat.finished_at, None);
    }

    #[test]
    fn foreign_character_is_denied() {
        let catalog = testing::catalog();
        let result = create_match(
            &catalog.env(),
            PlayerId(99),
            MatchId(1),
            &CreateMatchRequest::training(HERO, [GOBLIN]),
            testing::now(),
        );
        assert!(matches!(result, Err(CombatError::PermissionDenied(_))));
    }

    #[test]
    fn empty_lineup_is_invalid() {
        let catalog = testing::catalog();
        let result = create_match(
            &catalog.env(),
            OWNER,
            MatchId(1),
            &CreateMatchRequest::training(HERO, Vec::new()),
            testing::now(),
        );
        assert!(matches!(result, Err(CombatError::Validation(_))));
    }

    #[test]
    fn deck_cards_become_charges() {
        let catalog = testing::catalog();
        let request = CreateMatchRequest::training(HERO, [GOBLIN]).with_deck(Deck {
            cards: vec![STEAM, STEAM],
        });
        let combat = create_match(&catalog.env(), OWNER, MatchId(1), &request, testing::now())
            .expect("match created");

        assert_eq!(combat.combatants[0].charges.len(), 2);
        assert!(combat.combatants[0].has_charge(STEAM));

        let primitive = CreateMatchRequest::training(HERO, [GOBLIN]).with_deck(Deck {
            cards: vec![ElementId(1)],
        });
        let result = create_match(&catalog.env(), OWNER, MatchId(2), &primitive, testing::now());
        assert!(matches!(result, Err(CombatError::Validation(_))));
    }

    #[test]
    fn unknown_enemy_is_not_found() {
        let catalog = testing::catalog();
        let result = create_match(
            &catalog.env(),
            OWNER,
            MatchId(1),
            &CreateMatchRequest::training(HERO, [EnemyId(404)]),
            testing::now(),
        );
        assert_eq!(
            result,
            Err(CombatError::NotFound(Missing::Enemy(EnemyId(404))))
        );
    }
}
