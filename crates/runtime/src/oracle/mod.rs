//! Runtime wrapper around the static combat catalog.
//!
//! The catalog is immutable at runtime; dynamic state lives in repositories
//! or in the [`combat_core::CombatMatch`] owned by each worker.
use std::sync::Arc;

use combat_core::{CatalogSnapshot, CombatPolicies, GameEnv};

/// Shares the loaded catalog and engine policies across match workers.
#[derive(Clone, Debug)]
pub struct OracleManager {
    catalog: Arc<CatalogSnapshot>,
    policies: Arc<CombatPolicies>,
}

impl OracleManager {
    pub fn new(catalog: Arc<CatalogSnapshot>, policies: Arc<CombatPolicies>) -> Self {
        Self { catalog, policies }
    }

    /// Wraps a catalog with policies derived from its own combat config.
    pub fn from_catalog(catalog: CatalogSnapshot) -> Self {
        let policies = CombatPolicies::from_config(&catalog.config);
        Self::new(Arc::new(catalog), Arc::new(policies))
    }

    /// Converts the catalog into a GameEnv for combat-core.
    pub fn as_game_env(&self) -> GameEnv<'_> {
        self.catalog.env()
    }

    pub fn policies(&self) -> &CombatPolicies {
        &self.policies
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }
}
