use std::sync::Arc;

use combat_content::bundled_catalog;
use combat_core::{
    Action, CastingMode, CharacterId, CombatError, CombatantId, CreateMatchRequest, EnemyId,
    GameError, MatchId, MatchStatus, MatchType, Missing, PlayerId, SpellId, StageId, Team,
};
use runtime::{
    FileMatchRepository, InMemoryMatchRepository, MatchEvent, MatchRepository, OracleManager,
    Runtime, RuntimeConfig, RuntimeError,
};

const EMBER_OWNER: PlayerId = PlayerId(1);
const EMBER: CharacterId = CharacterId(1);
const HERO: CombatantId = CombatantId(0);
const GOBLIN: CombatantId = CombatantId(1);
const FIREBALL: SpellId = SpellId(1);

fn oracles() -> OracleManager {
    OracleManager::from_catalog(bundled_catalog().expect("bundled content should load"))
}

async fn start() -> Runtime {
    Runtime::builder()
        .oracles(oracles())
        .build()
        .await
        .expect("runtime should start")
}

fn fireball(target: CombatantId) -> Action {
    Action::CastSpell {
        spell: FIREBALL,
        target,
        mode: CastingMode::default(),
    }
}

fn combat_error(err: &RuntimeError) -> &CombatError {
    err.as_combat().expect("expected a combat error")
}

/// Create a training match, cast once and read it back.
#[tokio::test]
async fn create_cast_and_query() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut events = handle.subscribe();

    let combat = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match should be created");
    assert_eq!(combat.id, MatchId(1));
    assert_eq!(combat.status, MatchStatus::InProgress);
    assert_eq!(combat.current, HERO);
    assert_eq!(handle.active_matches().expect("registry"), 1);

    match events.recv().await.expect("created event") {
        MatchEvent::MatchCreated {
            match_id,
            owner,
            match_type,
        } => {
            assert_eq!(match_id, combat.id);
            assert_eq!(owner, EMBER_OWNER);
            assert_eq!(match_type, MatchType::Training);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let ap_before = combat.combatants[0].ap;
    let (after, outcome) = handle
        .perform_action(EMBER_OWNER, combat.id, HERO, fireball(GOBLIN))
        .await
        .expect("fireball should resolve");

    assert_eq!(after.combatants[0].ap, ap_before - 2);
    assert!(after.combatants[1].hp < combat.combatants[1].hp);
    assert_eq!(outcome.caster, HERO);
    assert!(outcome.cast.is_some());

    let event = events.recv().await.expect("action event");
    assert!(matches!(event, MatchEvent::ActionPerformed { caster: HERO, .. }));
    assert_eq!(event.match_id(), combat.id);

    let queried = handle.query_match(combat.id).await.expect("query");
    assert_eq!(queried, after);

    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn match_ids_are_allocated_in_order() {
    let runtime = start().await;
    let handle = runtime.handle();

    let first = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::story(EMBER, StageId(1)))
        .await
        .expect("story match");
    let second = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::story(EMBER, StageId(2)))
        .await
        .expect("story match");

    assert_eq!(first.id, MatchId(1));
    assert_eq!(second.id, MatchId(2));
    assert_eq!(first.combatants.len(), 3);
    assert_eq!(second.combatants.len(), 4);
}

#[tokio::test]
async fn foreign_character_cannot_be_used() {
    let runtime = start().await;
    let err = runtime
        .handle()
        .create_match(PlayerId(2), CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect_err("character belongs to player 1");

    assert!(matches!(combat_error(&err), CombatError::PermissionDenied(_)));
    assert_eq!(err.error_code(), "COMBAT_PERMISSION_DENIED");
}

#[tokio::test]
async fn rejected_action_leaves_match_unchanged() {
    let runtime = start().await;
    let handle = runtime.handle();
    let combat = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match");
    let mut events = handle.subscribe();

    let err = handle
        .perform_action(EMBER_OWNER, combat.id, GOBLIN, fireball(HERO))
        .await
        .expect_err("NPC casters are not controllable");
    assert!(matches!(combat_error(&err), CombatError::PermissionDenied(_)));

    let err = handle
        .perform_action(PlayerId(2), combat.id, HERO, fireball(GOBLIN))
        .await
        .expect_err("actor does not own the match");
    assert!(matches!(combat_error(&err), CombatError::PermissionDenied(_)));

    assert!(matches!(
        events.recv().await.expect("rejection event"),
        MatchEvent::ActionRejected { caster: GOBLIN, .. }
    ));
    assert_eq!(handle.query_match(combat.id).await.expect("query"), combat);
}

#[tokio::test]
async fn unknown_match_is_not_found() {
    let runtime = start().await;
    let err = runtime
        .handle()
        .query_match(MatchId(99))
        .await
        .expect_err("no such match");

    assert_eq!(
        combat_error(&err),
        &CombatError::NotFound(Missing::Match(MatchId(99)))
    );
}

#[tokio::test]
async fn end_turn_hands_the_turn_back_after_npc_moves() {
    let runtime = start().await;
    let handle = runtime.handle();
    let combat = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match");

    let (after, outcome) = handle
        .perform_action(EMBER_OWNER, combat.id, HERO, Action::EndTurn)
        .await
        .expect("end turn");

    assert_eq!(outcome.npc_moves.len(), 1);
    assert_eq!(after.current, HERO);
    assert_eq!(after.turn_number, 2);
    assert!(after.combatants[0].hp < after.combatants[0].max_hp);
}

#[tokio::test]
async fn abort_is_owner_only_and_terminal() {
    let runtime = start().await;
    let handle = runtime.handle();
    let combat = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match");

    let err = handle
        .abort_match(PlayerId(2), combat.id)
        .await
        .expect_err("only the owner may abort");
    assert!(matches!(combat_error(&err), CombatError::PermissionDenied(_)));

    let aborted = handle
        .abort_match(EMBER_OWNER, combat.id)
        .await
        .expect("owner aborts");
    assert_eq!(aborted.status, MatchStatus::Aborted);
    assert!(aborted.finished_at.is_some());
    assert_eq!(handle.active_matches().expect("registry"), 0);
    assert_eq!(handle.query_match(combat.id).await.expect("query"), aborted);

    let err = handle
        .perform_action(EMBER_OWNER, combat.id, HERO, fireball(GOBLIN))
        .await
        .expect_err("aborted matches reject actions");
    assert_eq!(combat_error(&err), &CombatError::MatchAlreadyEnded(combat.id));
}

#[tokio::test]
async fn repeated_casts_finish_the_match() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut events = handle.subscribe();
    let combat = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match");

    let mut winner = None;
    for _ in 0..60 {
        let current = handle.query_match(combat.id).await.expect("query");
        if current.is_terminal() {
            break;
        }
        let action = if current.combatants[0].ap >= 2 {
            fireball(GOBLIN)
        } else {
            Action::EndTurn
        };
        let (_, outcome) = handle
            .perform_action(EMBER_OWNER, combat.id, HERO, action)
            .await
            .expect("action");
        if outcome.winner.is_some() {
            winner = outcome.winner;
        }
    }

    assert_eq!(winner, Some(Team::Player));
    let finished = handle.query_match(combat.id).await.expect("query");
    assert_eq!(finished.status, MatchStatus::Finished);

    // The worker is released once the match ends; reads and rejections are
    // served from the repository.
    assert_eq!(handle.active_matches().expect("registry"), 0);
    let err = handle
        .perform_action(EMBER_OWNER, combat.id, HERO, Action::EndTurn)
        .await
        .expect_err("finished matches reject actions");
    assert_eq!(combat_error(&err), &CombatError::MatchAlreadyEnded(combat.id));
    assert_eq!(handle.active_matches().expect("registry"), 0);

    let mut saw_finished = false;
    while let Ok(event) = events.try_recv() {
        if let MatchEvent::MatchFinished { winner, .. } = event {
            assert_eq!(winner, Team::Player);
            saw_finished = true;
        }
    }
    assert!(saw_finished);
}

/// Matches persisted by one runtime are revived by the next.
#[tokio::test]
async fn file_repository_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = RuntimeConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..RuntimeConfig::default()
    };

    let runtime = Runtime::builder()
        .config(config.clone())
        .oracles(oracles())
        .build()
        .await
        .expect("runtime");
    let handle = runtime.handle();
    let combat = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match");
    let (after, _) = handle
        .perform_action(EMBER_OWNER, combat.id, HERO, fireball(GOBLIN))
        .await
        .expect("fireball");
    runtime.shutdown().await.expect("shutdown");

    let repository = FileMatchRepository::new(dir.path()).expect("repo");
    assert_eq!(repository.list_ids().expect("list"), vec![combat.id]);

    let restarted = Runtime::builder()
        .config(config)
        .oracles(oracles())
        .build()
        .await
        .expect("runtime");
    let handle = restarted.handle();
    assert_eq!(handle.query_match(combat.id).await.expect("revived"), after);

    let next = handle
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match");
    assert_eq!(next.id, MatchId(2));
}

#[tokio::test]
async fn explicit_repository_takes_precedence() {
    let repository = Arc::new(InMemoryMatchRepository::new());
    let runtime = Runtime::builder()
        .oracles(oracles())
        .repository(repository.clone())
        .build()
        .await
        .expect("runtime");

    let combat = runtime
        .handle()
        .create_match(EMBER_OWNER, CreateMatchRequest::training(EMBER, vec![EnemyId(1)]))
        .await
        .expect("match");

    assert!(repository.exists(combat.id).expect("exists"));
}
