//! Repository contracts for match snapshots and profiles.

use trails_core::GameState;

use super::{Profile, RatingChange, RepositoryError, Result};

/// Match snapshots indexed by turn number.
pub trait StateRepository: Send + Sync {
    fn save(&self, turn: u64, state: &GameState) -> Result<()>;

    fn load(&self, turn: u64) -> Result<Option<GameState>>;

    fn exists(&self, turn: u64) -> bool;

    fn delete(&self, turn: u64) -> Result<()>;

    /// All stored turn numbers in ascending order.
    fn list_turns(&self) -> Result<Vec<u64>> {
        Ok(vec![])
    }

    /// Most recent snapshot, if any.
    fn load_latest(&self) -> Result<Option<GameState>> {
        match self.list_turns()?.last() {
            Some(turn) => self.load(*turn),
            None => Ok(None),
        }
    }

    /// Delete all snapshots in `[start, end]`.
    fn delete_range(&self, start: u64, end: u64) -> Result<usize> {
        let mut deleted = 0;
        for turn in start..=end {
            if self.exists(turn) {
                self.delete(turn)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

/// Participant profiles keyed by profile id.
pub trait ProfileRepository: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<Profile>>;

    fn save(&self, profile: &Profile) -> Result<()>;

    fn list(&self) -> Result<Vec<Profile>>;

    /// Stored profile, or a fresh one saved under `id`.
    fn get_or_create(&self, id: &str, display_name: &str) -> Result<Profile> {
        if let Some(profile) = self.get(id)? {
            return Ok(profile);
        }
        let profile = Profile::new(id, display_name);
        self.save(&profile)?;
        Ok(profile)
    }

    /// Applies a graded answer to the stored profile and returns the new rating.
    fn record_answer(&self, id: &str, change: RatingChange) -> Result<i32> {
        let mut profile = self
            .get(id)?
            .ok_or_else(|| RepositoryError::UnknownProfile(id.to_owned()))?;
        profile.apply(change);
        self.save(&profile)?;
        Ok(profile.rating)
    }

    /// Bumps the match counters once a match has ended.
    fn record_match(&self, id: &str, won: bool) -> Result<()> {
        let mut profile = self
            .get(id)?
            .ok_or_else(|| RepositoryError::UnknownProfile(id.to_owned()))?;
        profile.matches_played += 1;
        if won {
            profile.matches_won += 1;
        }
        self.save(&profile)
    }
}
