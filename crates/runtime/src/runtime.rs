//! High-level runtime orchestrator.
//!
//! The runtime owns the per-match workers, wires up the event channel and
//! exposes a builder-based API for clients to drive matches.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api::{MatchEvent, Result, RuntimeError, RuntimeHandle};
use crate::oracle::OracleManager;
use crate::repository::{FileMatchRepository, InMemoryMatchRepository, MatchRepository};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Directory for the file repository. `None` keeps matches in memory.
    pub data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Reads overrides from `COMBAT_COMMAND_BUFFER`, `COMBAT_EVENT_BUFFER`
    /// and `COMBAT_DATA_DIR`; unset or unparsable values keep the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<usize>("COMBAT_COMMAND_BUFFER").filter(|size| *size > 0) {
            config.command_buffer_size = size;
        }
        if let Some(size) = read_env::<usize>("COMBAT_EVENT_BUFFER").filter(|size| *size > 0) {
            config.event_buffer_size = size;
        }
        if let Some(dir) = read_env::<PathBuf>("COMBAT_DATA_DIR") {
            config.data_dir = Some(dir);
        }

        config
    }

    /// Platform data directory for persisted matches.
    ///
    /// - Linux: `~/.local/share/elemental-combat/matches`
    /// - macOS: `~/Library/Application Support/elemental-combat/matches`
    /// - Fallback: `./save_data/matches`
    pub fn default_data_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "elemental-combat")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
            .join("matches")
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates match workers.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to match events
    pub fn subscribe_events(&self) -> broadcast::Receiver<MatchEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully, waiting for every worker to drain.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown_workers().await
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn MatchRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Use a specific repository instead of the one implied by `config.data_dir`.
    pub fn repository(mut self, repository: Arc<dyn MatchRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let repository: Arc<dyn MatchRepository> = match (self.repository, &self.config.data_dir) {
            (Some(repository), _) => repository,
            (None, Some(dir)) => Arc::new(FileMatchRepository::new(dir)?),
            (None, None) => Arc::new(InMemoryMatchRepository::new()),
        };

        // Continue numbering after the highest persisted match.
        let first_id = repository
            .list_ids()?
            .last()
            .map_or(1, |last| last.0 + 1);

        let (event_tx, _event_rx) =
            broadcast::channel::<MatchEvent>(self.config.event_buffer_size);

        tracing::info!(
            target: "runtime",
            first_id,
            persistent = self.config.data_dir.is_some(),
            "runtime started"
        );

        let handle = RuntimeHandle::new(
            oracles,
            repository,
            event_tx,
            first_id,
            self.config.command_buffer_size,
        );

        Ok(Runtime { handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_keeps_matches_in_memory() {
        let config = RuntimeConfig::default();
        assert_eq!(config.command_buffer_size, 32);
        assert_eq!(config.event_buffer_size, 100);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn default_data_dir_ends_with_matches() {
        assert!(RuntimeConfig::default_data_dir().ends_with("matches"));
    }

    #[tokio::test]
    async fn build_requires_oracles() {
        let result = Runtime::builder().build().await;
        assert!(matches!(result, Err(RuntimeError::MissingOracles)));
    }
}
