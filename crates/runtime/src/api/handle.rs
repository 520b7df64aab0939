//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides the per-match worker registry and channel plumbing
//! and offers async helpers for creating, driving and observing matches.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use combat_core::{
    Action, ActionOutcome, CombatError, CombatMatch, CombatantId, CreateMatchRequest, MatchId,
    Missing, PlayerId, create_match,
};

use super::errors::{Result, RuntimeError};
use super::events::MatchEvent;
use crate::oracle::OracleManager;
use crate::repository::MatchRepository;
use crate::workers::{Command, MatchWorker};

struct WorkerSlot {
    command_tx: mpsc::Sender<Command>,
    join: JoinHandle<()>,
}

enum Route {
    Worker(mpsc::Sender<Command>),
    Ended(CombatMatch),
}

struct Shared {
    oracles: OracleManager,
    repository: Arc<dyn MatchRepository>,
    events: broadcast::Sender<MatchEvent>,
    workers: Mutex<HashMap<MatchId, WorkerSlot>>,
    next_id: AtomicU64,
    command_buffer_size: usize,
}

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    shared: Arc<Shared>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        oracles: OracleManager,
        repository: Arc<dyn MatchRepository>,
        events: broadcast::Sender<MatchEvent>,
        first_id: u64,
        command_buffer_size: usize,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                oracles,
                repository,
                events,
                workers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(first_id),
                command_buffer_size,
            }),
        }
    }

    /// Creates and persists a new match owned by `actor`, then starts its worker.
    pub async fn create_match(
        &self,
        actor: PlayerId,
        request: CreateMatchRequest,
    ) -> Result<CombatMatch> {
        let id = MatchId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let combat = {
            let env = self.shared.oracles.as_game_env();
            create_match(&env, actor, id, &request, Utc::now())?
        };
        self.shared.repository.save(&combat)?;
        self.spawn_worker(combat.clone())?;

        info!(
            target: "runtime::handle",
            match_id = id.0,
            owner = actor.0,
            match_type = ?combat.match_type,
            "match created"
        );
        self.publish(MatchEvent::MatchCreated {
            match_id: id,
            owner: actor,
            match_type: combat.match_type,
        });

        Ok(combat)
    }

    /// Executes `action` for `caster` and returns the committed match with the outcome.
    pub async fn perform_action(
        &self,
        actor: PlayerId,
        match_id: MatchId,
        caster: CombatantId,
        action: Action,
    ) -> Result<(CombatMatch, ActionOutcome)> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            match_id,
            Command::Perform {
                actor,
                caster,
                action,
                reply: reply_tx,
            },
        )
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the committed state of a match (read-only snapshot).
    pub async fn query_match(&self, match_id: MatchId) -> Result<CombatMatch> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(match_id, Command::Query { reply: reply_tx })
            .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Cancels a match. Only its owner may abort it.
    pub async fn abort_match(&self, actor: PlayerId, match_id: MatchId) -> Result<CombatMatch> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            match_id,
            Command::Abort {
                actor,
                reply: reply_tx,
            },
        )
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribe to events from every match.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.shared.events.subscribe()
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.shared.oracles
    }

    /// Number of matches with a running worker.
    pub fn active_matches(&self) -> Result<usize> {
        let mut workers = self
            .shared
            .workers
            .lock()
            .map_err(|_| RuntimeError::RegistryPoisoned)?;
        workers.retain(|_, slot| !slot.command_tx.is_closed());
        Ok(workers.len())
    }

    async fn send(&self, match_id: MatchId, mut command: Command) -> Result<()> {
        // A worker may close its mailbox between lookup and send once its match
        // ends; the second lookup then finds the ended match in the repository.
        for _ in 0..2 {
            match self.route(match_id)? {
                Route::Worker(command_tx) => match command_tx.send(command).await {
                    Ok(()) => return Ok(()),
                    Err(mpsc::error::SendError(returned)) => command = returned,
                },
                Route::Ended(combat) => {
                    command.answer_ended(combat);
                    return Ok(());
                }
            }
        }
        Err(RuntimeError::CommandChannelClosed(match_id))
    }

    /// Finds the worker for `match_id`, reviving it from the repository when
    /// none is running. Ended matches are served from the repository directly.
    fn route(&self, match_id: MatchId) -> Result<Route> {
        {
            let mut workers = self
                .shared
                .workers
                .lock()
                .map_err(|_| RuntimeError::RegistryPoisoned)?;
            workers.retain(|_, slot| !slot.command_tx.is_closed());
            if let Some(slot) = workers.get(&match_id) {
                return Ok(Route::Worker(slot.command_tx.clone()));
            }
        }

        let combat = self
            .shared
            .repository
            .load(match_id)?
            .ok_or(CombatError::NotFound(Missing::Match(match_id)))?;
        if combat.is_terminal() {
            return Ok(Route::Ended(combat));
        }

        debug!(target: "runtime::handle", match_id = match_id.0, "reviving match worker from repository");
        self.spawn_worker(combat).map(Route::Worker)
    }

    fn spawn_worker(&self, combat: CombatMatch) -> Result<mpsc::Sender<Command>> {
        let mut workers = self
            .shared
            .workers
            .lock()
            .map_err(|_| RuntimeError::RegistryPoisoned)?;

        // Another caller may have revived the worker while the repository was read.
        if let Some(slot) = workers.get(&combat.id)
            && !slot.command_tx.is_closed()
        {
            return Ok(slot.command_tx.clone());
        }

        let match_id = combat.id;
        let (command_tx, command_rx) = mpsc::channel(self.shared.command_buffer_size);
        let worker = MatchWorker::new(
            combat,
            self.shared.oracles.clone(),
            Arc::clone(&self.shared.repository),
            command_rx,
            self.shared.events.clone(),
        );
        let join = tokio::spawn(async move {
            worker.run().await;
        });

        workers.insert(
            match_id,
            WorkerSlot {
                command_tx: command_tx.clone(),
                join,
            },
        );
        Ok(command_tx)
    }

    /// Closes every worker mailbox and waits for the tasks to drain.
    pub(crate) async fn shutdown_workers(&self) -> Result<()> {
        let slots: Vec<WorkerSlot> = {
            let mut workers = self
                .shared
                .workers
                .lock()
                .map_err(|_| RuntimeError::RegistryPoisoned)?;
            workers.drain().map(|(_, slot)| slot).collect()
        };

        for slot in slots {
            drop(slot.command_tx);
            slot.join.await.map_err(RuntimeError::WorkerJoin)?;
        }
        Ok(())
    }

    fn publish(&self, event: MatchEvent) {
        if self.shared.events.send(event).is_err() {
            debug!(target: "runtime::handle", "no event subscribers");
        }
    }
}
