//! File-based MatchRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use combat_core::{CombatMatch, MatchId};

use super::error::{RepositoryError, Result};
use super::traits::MatchRepository;

/// Stores each match as `match_{id}.json` under a base directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never observes a half-written match.
pub struct FileMatchRepository {
    base_dir: PathBuf,
}

impl FileMatchRepository {
    /// Create a new file-based match repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn match_path(&self, id: MatchId) -> PathBuf {
        self.base_dir.join(format!("match_{}.json", id.0))
    }
}

impl MatchRepository for FileMatchRepository {
    fn save(&self, combat: &CombatMatch) -> Result<()> {
        let path = self.match_path(combat.id);
        let temp_path = path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec_pretty(combat).map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(target: "runtime::repository", match_id = combat.id.0, path = %path.display(), "saved match");
        Ok(())
    }

    fn load(&self, id: MatchId) -> Result<Option<CombatMatch>> {
        let path = self.match_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let combat: CombatMatch =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;
        if combat.id != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds match {}",
                path.display(),
                combat.id
            )));
        }
        Ok(Some(combat))
    }

    fn exists(&self, id: MatchId) -> Result<bool> {
        Ok(self.match_path(id).exists())
    }

    fn delete(&self, id: MatchId) -> Result<()> {
        let path = self.match_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", match_id = id.0, "deleted match");
        }
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<MatchId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("match_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(id) = id.parse::<u64>()
            {
                ids.push(MatchId(id));
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use combat_content::bundled_catalog;
    use combat_core::{CharacterId, CreateMatchRequest, EnemyId, PlayerId, create_match};

    fn sample(id: u64) -> CombatMatch {
        let catalog = bundled_catalog().expect("bundled content");
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("timestamp");
        let request = CreateMatchRequest::training(CharacterId(1), vec![EnemyId(1)]);
        create_match(&catalog.env(), PlayerId(1), MatchId(id), &request, now).expect("match")
    }

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileMatchRepository::new(dir.path()).expect("repo");
        let combat = sample(4);

        repo.save(&combat).expect("save");

        assert!(repo.exists(MatchId(4)).expect("exists"));
        assert_eq!(repo.load(MatchId(4)).expect("load"), Some(combat));
        assert_eq!(repo.load(MatchId(5)).expect("load"), None);
    }

    #[test]
    fn lists_ids_and_ignores_other_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileMatchRepository::new(dir.path()).expect("repo");
        repo.save(&sample(12)).expect("save");
        repo.save(&sample(3)).expect("save");
        fs::write(dir.path().join("notes.txt"), "x").expect("write");

        assert_eq!(repo.list_ids().expect("list"), vec![MatchId(3), MatchId(12)]);

        repo.delete(MatchId(3)).expect("delete");
        assert_eq!(repo.list_ids().expect("list"), vec![MatchId(12)]);
    }

    #[test]
    fn mismatched_id_is_corrupted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileMatchRepository::new(dir.path()).expect("repo");
        repo.save(&sample(1)).expect("save");
        fs::rename(dir.path().join("match_1.json"), dir.path().join("match_2.json")).expect("rename");

        assert!(matches!(
            repo.load(MatchId(2)),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
