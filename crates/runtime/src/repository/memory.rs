//! In-memory MatchRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use combat_core::{CombatMatch, MatchId};

use super::error::{RepositoryError, Result};
use super::traits::MatchRepository;

#[derive(Default)]
pub struct InMemoryMatchRepository {
    matches: RwLock<BTreeMap<MatchId, CombatMatch>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchRepository for InMemoryMatchRepository {
    fn save(&self, combat: &CombatMatch) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        matches.insert(combat.id, combat.clone());
        Ok(())
    }

    fn load(&self, id: MatchId) -> Result<Option<CombatMatch>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.get(&id).cloned())
    }

    fn exists(&self, id: MatchId) -> Result<bool> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.contains_key(&id))
    }

    fn delete(&self, id: MatchId) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        matches.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<MatchId>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.keys().copied().collect())
    }
}
