//! Play a scripted match through the runtime.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use combat_core::{
    Action, ActionOutcome, CharacterId, CombatMatch, CreateMatchRequest, EnemyId, GameError,
    NpcMoveKind, PlayerId, StageId,
};
use runtime::{OracleManager, Runtime, RuntimeConfig};

use super::{load_catalog, print_roster};
use crate::autoplay::choose_action;

/// Play a scripted match against NPCs
#[derive(Parser)]
pub struct Play {
    /// Player account issuing the actions
    #[arg(long, default_value_t = 1)]
    player: u64,

    /// Character to field
    #[arg(short, long, default_value_t = 1)]
    character: u32,

    /// Story stage to play
    #[arg(short, long, conflicts_with = "enemies")]
    stage: Option<u32>,

    /// Training opponents, repeatable (defaults to enemy 1)
    #[arg(short, long = "enemy", value_name = "ENEMY")]
    enemies: Vec<u32>,

    /// Content directory (defaults to the bundled content)
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Persist matches under the data directory
    #[arg(long)]
    persist: bool,

    /// Stop after this many player actions
    #[arg(long, default_value_t = 200)]
    max_actions: u32,
}

impl Play {
    pub async fn execute(self) -> Result<()> {
        let catalog = load_catalog(self.content.as_deref())?;
        let oracles = OracleManager::from_catalog(catalog);

        let mut config = RuntimeConfig::from_env();
        if self.persist && config.data_dir.is_none() {
            config.data_dir = Some(RuntimeConfig::default_data_dir());
        }

        let runtime = Runtime::builder().config(config).oracles(oracles).build().await?;
        let handle = runtime.handle();

        let actor = PlayerId(self.player);
        let character = CharacterId(self.character);
        let request = match self.stage {
            Some(stage) => CreateMatchRequest::story(character, StageId(stage)),
            None if self.enemies.is_empty() => {
                CreateMatchRequest::training(character, vec![EnemyId(1)])
            }
            None => CreateMatchRequest::training(
                character,
                self.enemies.iter().copied().map(EnemyId).collect::<Vec<_>>(),
            ),
        };

        let mut combat = handle.create_match(actor, request).await?;
        println!("Match {} ({})", combat.id, combat.match_type);
        print_roster(&combat);

        let mut actions = 0;
        while !combat.is_terminal() && actions < self.max_actions {
            let caster = combat.current;
            let action = choose_action(&combat, handle.oracles().catalog());
            actions += 1;

            match handle.perform_action(actor, combat.id, caster, action).await {
                Ok((after, outcome)) => {
                    report(&after, &outcome);
                    combat = after;
                }
                Err(err) if err.severity().is_recoverable() && action != Action::EndTurn => {
                    println!("  {err}; ending turn");
                    let (after, outcome) = handle
                        .perform_action(actor, combat.id, caster, Action::EndTurn)
                        .await?;
                    report(&after, &outcome);
                    combat = after;
                }
                Err(err) => bail!("action rejected: {err}"),
            }
        }

        println!();
        match combat.winner {
            Some(winner) => println!("Match {} finished: {winner} team wins", combat.id),
            None => println!(
                "Match {} stopped after {actions} actions ({})",
                combat.id, combat.status
            ),
        }
        print_roster(&combat);

        runtime.shutdown().await?;
        Ok(())
    }
}

fn report(combat: &CombatMatch, outcome: &ActionOutcome) {
    let name = |id: combat_core::CombatantId| {
        combat
            .combatant(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    };

    if let Some(effect) = outcome.suppressed {
        println!("{} is held by effect {effect} and loses the turn", name(outcome.caster));
    }
    if let Some(cast) = &outcome.cast {
        println!(
            "{} casts ({} AP, {} MP): {} damage, {} healing, {} absorbed",
            name(cast.caster),
            cast.ap_spent,
            cast.mp_spent,
            cast.totals.damage,
            cast.totals.healing,
            cast.totals.absorbed,
        );
        for warning in &cast.warnings {
            println!("  warning: {warning}");
        }
    }
    for turn in &outcome.turns {
        if turn.dot_damage > 0 {
            println!("{} takes {} damage over time", name(turn.ended), turn.dot_damage);
        }
        if turn.next != turn.ended {
            println!("-- turn {}: {} (+{} AP) --", turn.turn_number, name(turn.next), turn.ap_granted);
        }
    }
    for npc in &outcome.npc_moves {
        let who = name(npc.combatant);
        match &npc.kind {
            NpcMoveKind::Ability(cast) => println!(
                "{who} uses an ability: {} damage, {} healing",
                cast.totals.damage, cast.totals.healing
            ),
            NpcMoveKind::Defend { shield } => println!("{who} defends (+{shield} shield)"),
            NpcMoveKind::Pass => println!("{who} waits"),
            NpcMoveKind::Flee => println!("{who} tries to flee"),
            NpcMoveKind::Suppressed(effect) => println!("{who} is held by effect {effect}"),
            NpcMoveKind::Degraded { reason, .. } => println!("{who} falters: {reason}"),
        }
    }
}
