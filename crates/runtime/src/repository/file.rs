//! File-backed repositories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use trails_core::GameState;

use super::{Profile, ProfileRepository, RepositoryError, Result, StateRepository};

/// Snapshots stored as individual bincode files.
///
/// Each snapshot lives in `state_{turn}.bin`. Writes go to a temp file and
/// are renamed into place so a crash never leaves a truncated snapshot.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn state_path(&self, turn: u64) -> PathBuf {
        self.base_dir.join(format!("state_{}.bin", turn))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, turn: u64, state: &GameState) -> Result<()> {
        let path = self.state_path(turn);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved snapshot[{}] to {}", turn, path.display());
        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<GameState>> {
        let path = self.state_path(turn);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: GameState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded snapshot[{}] from {}", turn, path.display());
        Ok(Some(state))
    }

    fn exists(&self, turn: u64) -> bool {
        self.state_path(turn).exists()
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let path = self.state_path(turn);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted snapshot[{}]", turn);
        }
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let mut turns = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(turn_str) = filename
                    .strip_prefix("state_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(turn) = turn_str.parse::<u64>()
            {
                turns.push(turn);
            }
        }

        turns.sort_unstable();
        Ok(turns)
    }
}

/// All profiles in a single pretty-printed `profiles.json`.
pub struct FileProfileRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileProfileRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join("profiles.json"),
            write_lock: Mutex::new(()),
        })
    }

    fn read_all(&self) -> Result<BTreeMap<String, Profile>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    fn write_all(&self, profiles: &BTreeMap<String, Profile>) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(profiles)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl ProfileRepository for FileProfileRepository {
    fn get(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self.read_all()?.remove(id))
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut profiles = self.read_all()?;
        profiles.insert(profile.id.clone(), profile.clone());
        self.write_all(&profiles)?;
        tracing::debug!("Saved profile '{}' to {}", profile.id, self.path.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Profile>> {
        Ok(self.read_all()?.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use trails_core::{Element, Landing, PlayerId, PlayerState, ProfileRef};

    use super::*;

    fn state(seed: u64) -> GameState {
        let player = PlayerState::new(
            PlayerId(0),
            Element::Water,
            ProfileRef::guest(PlayerId(0)),
            Landing::new("main", 3),
            3,
        );
        GameState::new(seed, vec![player]).unwrap()
    }

    #[test]
    fn snapshots_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        repo.save(2, &state(11)).unwrap();
        repo.save(10, &state(12)).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let reopened = FileStateRepository::new(dir.path()).unwrap();
        assert_eq!(reopened.list_turns().unwrap(), vec![2, 10]);
        assert_eq!(reopened.load(2).unwrap(), Some(state(11)));
        assert_eq!(reopened.load_latest().unwrap(), Some(state(12)));

        reopened.delete(2).unwrap();
        assert!(!reopened.exists(2));
        assert!(reopened.load(2).unwrap().is_none());
    }

    #[test]
    fn truncated_snapshot_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("state_1.bin"), [1u8, 2]).unwrap();

        let err = repo.load(1).unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptedData(_)));
    }

    #[test]
    fn profiles_are_shared_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileProfileRepository::new(dir.path()).unwrap();
        first.get_or_create("ana", "Ana").unwrap();
        first.get_or_create("bo", "Bo").unwrap();
        first.record_match("bo", true).unwrap();

        let second = FileProfileRepository::new(dir.path()).unwrap();
        let profiles = second.list().unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(second.get("bo").unwrap().unwrap().matches_won, 1);
        assert!(second.get("cy").unwrap().is_none());
    }
}
