//! Worker task that owns the authoritative [`CombatMatch`] for one match.
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them through the
//! [`CombatEngine`] and publishes [`MatchEvent`]s.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use combat_core::{
    Action, ActionOutcome, CombatEngine, CombatError, CombatMatch, CombatantId, GameError,
    PlayerId,
};

use crate::api::{MatchEvent, Result};
use crate::oracle::OracleManager;
use crate::repository::MatchRepository;

/// Commands that can be sent to a match worker.
pub enum Command {
    /// Execute a player action on behalf of `actor`.
    Perform {
        actor: PlayerId,
        caster: CombatantId,
        action: Action,
        reply: oneshot::Sender<Result<(CombatMatch, ActionOutcome)>>,
    },
    /// Read the committed match state.
    Query {
        reply: oneshot::Sender<CombatMatch>,
    },
    /// Cancel the match. Only the owner may abort.
    Abort {
        actor: PlayerId,
        reply: oneshot::Sender<Result<CombatMatch>>,
    },
}

impl Command {
    /// Answers a command for a match that has already ended without a worker.
    pub fn answer_ended(self, combat: CombatMatch) {
        let match_id = combat.id;
        let sent = match self {
            Command::Query { reply } => reply.send(combat).is_ok(),
            Command::Perform { reply, .. } => reply
                .send(Err(CombatError::MatchAlreadyEnded(match_id).into()))
                .is_ok(),
            Command::Abort { reply, .. } => reply
                .send(Err(CombatError::MatchAlreadyEnded(match_id).into()))
                .is_ok(),
        };
        if !sent {
            debug!(target: "runtime::worker", match_id = match_id.0, "reply channel closed (caller dropped)");
        }
    }
}

/// Background task processing commands for a single match.
///
/// Every mutation runs against a staging clone. The clone is persisted and
/// then swapped in only when the engine succeeds, so a rejected action or a
/// failed save leaves the committed match untouched.
pub struct MatchWorker {
    combat: CombatMatch,
    oracles: OracleManager,
    repository: Arc<dyn MatchRepository>,
    command_rx: mpsc::Receiver<Command>,
    events: broadcast::Sender<MatchEvent>,
}

impl MatchWorker {
    pub fn new(
        combat: CombatMatch,
        oracles: OracleManager,
        repository: Arc<dyn MatchRepository>,
        command_rx: mpsc::Receiver<Command>,
        events: broadcast::Sender<MatchEvent>,
    ) -> Self {
        debug!(
            target: "runtime::worker",
            match_id = combat.id.0,
            combatants = combat.combatants.len(),
            status = ?combat.status,
            "match worker initialized"
        );

        Self {
            combat,
            oracles,
            repository,
            command_rx,
            events,
        }
    }

    /// Main worker loop. Exits once every command sender is dropped, or once
    /// the match has ended and the commands already queued are drained.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", match_id = self.combat.id.0, "match worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Perform {
                actor,
                caster,
                action,
                reply,
            } => {
                let result = self.handle_action(actor, caster, action);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Perform reply channel closed (caller dropped)");
                }
            }
            Command::Query { reply } => {
                if reply.send(self.combat.clone()).is_err() {
                    debug!(target: "runtime::worker", "Query reply channel closed (caller dropped)");
                }
            }
            Command::Abort { actor, reply } => {
                let result = self.handle_abort(actor);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Abort reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_action(
        &mut self,
        actor: PlayerId,
        caster: CombatantId,
        action: Action,
    ) -> Result<(CombatMatch, ActionOutcome)> {
        let match_id = self.combat.id;
        let mut staging = self.combat.clone();

        let result = {
            let env = self.oracles.as_game_env();
            let mut engine = CombatEngine::new(&mut staging, env, self.oracles.policies());
            engine.perform_action(actor, caster, action, Utc::now())
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    match_id = match_id.0,
                    caster = caster.0,
                    code = error.error_code(),
                    %error,
                    "action rejected"
                );
                self.publish(MatchEvent::ActionRejected {
                    match_id,
                    caster,
                    error: error.clone(),
                });
                return Err(error.into());
            }
        };

        self.commit(staging)?;

        self.publish(MatchEvent::ActionPerformed {
            match_id,
            caster,
            outcome: Box::new(outcome.clone()),
        });
        if let Some(winner) = outcome.winner {
            info!(target: "runtime::worker", match_id = match_id.0, ?winner, "match finished");
            self.publish(MatchEvent::MatchFinished { match_id, winner });
        }

        Ok((self.combat.clone(), outcome))
    }

    fn handle_abort(&mut self, actor: PlayerId) -> Result<CombatMatch> {
        let match_id = self.combat.id;
        if self.combat.owner != actor {
            return Err(CombatError::permission_denied(format!(
                "player {actor} does not own match {match_id}"
            ))
            .into());
        }

        let mut staging = self.combat.clone();
        {
            let env = self.oracles.as_game_env();
            let mut engine = CombatEngine::new(&mut staging, env, self.oracles.policies());
            engine.abort(Utc::now())?;
        }

        self.commit(staging)?;
        self.publish(MatchEvent::MatchAborted { match_id });
        Ok(self.combat.clone())
    }

    /// Persists `staging` and makes it the committed state.
    fn commit(&mut self, staging: CombatMatch) -> Result<()> {
        if let Err(err) = self.repository.save(&staging) {
            warn!(
                target: "runtime::worker",
                match_id = staging.id.0,
                error = %err,
                "failed to persist match; keeping previous state"
            );
            return Err(err.into());
        }
        self.combat = staging;

        // A terminal match never changes again; stop accepting commands so the
        // registry can release this worker.
        if self.combat.is_terminal() {
            self.command_rx.close();
        }
        Ok(())
    }

    fn publish(&self, event: MatchEvent) {
        if self.events.send(event).is_err() {
            debug!(target: "runtime::worker", "no event subscribers");
        }
    }
}
