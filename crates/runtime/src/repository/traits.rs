//! Repository contract for saving and loading matches.

use combat_core::{CombatMatch, MatchId};

use super::error::Result;

/// Persistence for the [`CombatMatch`] aggregate.
///
/// A save replaces the whole match. Workers only save after an action
/// succeeds, so a stored match is always a committed state.
pub trait MatchRepository: Send + Sync {
    fn save(&self, combat: &CombatMatch) -> Result<()>;

    fn load(&self, id: MatchId) -> Result<Option<CombatMatch>>;

    fn exists(&self, id: MatchId) -> Result<bool> {
        Ok(self.load(id)?.is_some())
    }

    fn delete(&self, id: MatchId) -> Result<()>;

    /// All stored match ids in ascending order.
    fn list_ids(&self) -> Result<Vec<MatchId>>;
}
