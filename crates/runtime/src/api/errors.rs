//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from combat rules, worker coordination and repositories so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{CombatError, ErrorSeverity, GameError, MatchId};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("match {0} worker command channel closed")]
    CommandChannelClosed(MatchId),

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("match worker registry lock was poisoned")]
    RegistryPoisoned,

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,
}

impl RuntimeError {
    /// Returns the wrapped combat error, if any.
    pub fn as_combat(&self) -> Option<&CombatError> {
        match self {
            Self::Combat(err) => Some(err),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(err) => err.severity(),
            Self::Repository(err) => err.severity(),
            Self::CommandChannelClosed(_) | Self::ReplyChannelClosed(_) => {
                ErrorSeverity::Recoverable
            }
            Self::WorkerJoin(_) | Self::RegistryPoisoned => ErrorSeverity::Fatal,
            Self::MissingOracles => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Combat(err) => err.error_code(),
            Self::Repository(err) => err.error_code(),
            Self::CommandChannelClosed(_) => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::RegistryPoisoned => "RUNTIME_REGISTRY_POISONED",
            Self::MissingOracles => "RUNTIME_MISSING_ORACLES",
        }
    }
}
