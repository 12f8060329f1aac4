//! In-memory repositories for tests and local runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use trails_core::GameState;

use super::{Profile, ProfileRepository, RepositoryError, Result, StateRepository};

/// Snapshots held in a map keyed by turn number.
pub struct InMemoryStateRepo {
    states: RwLock<HashMap<u64, GameState>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Create with an initial snapshot at turn 0.
    pub fn with_initial_state(initial_state: GameState) -> Self {
        let mut states = HashMap::new();
        states.insert(0, initial_state);
        Self {
            states: RwLock::new(states),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, turn: u64, state: &GameState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(turn, state.clone());
        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<GameState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(&turn).cloned())
    }

    fn exists(&self, turn: u64) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(&turn))
            .unwrap_or(false)
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(&turn);
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut turns: Vec<u64> = states.keys().copied().collect();
        turns.sort_unstable();
        Ok(turns)
    }
}

/// Profiles held in an ordered map keyed by id.
#[derive(Default)]
pub struct InMemoryProfileRepo {
    profiles: RwLock<BTreeMap<String, Profile>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            profiles: RwLock::new(profiles),
        }
    }
}

impl ProfileRepository for InMemoryProfileRepo {
    fn get(&self, id: &str) -> Result<Option<Profile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(profiles.get(id).cloned())
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Profile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(profiles.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use trails_core::{Difficulty, Element, Landing, PlayerId, PlayerState, ProfileRef};

    use super::*;
    use crate::repository::RatingChange;

    fn state() -> GameState {
        let player = PlayerState::new(
            PlayerId(0),
            Element::Fire,
            ProfileRef::guest(PlayerId(0)),
            Landing::new("main", 0),
            3,
        );
        GameState::new(7, vec![player]).unwrap()
    }

    #[test]
    fn latest_snapshot_is_highest_turn() {
        let repo = InMemoryStateRepo::with_initial_state(state());
        let mut later = state();
        later.turn.turn_number = 4;
        repo.save(4, &later).unwrap();

        assert_eq!(repo.list_turns().unwrap(), vec![0, 4]);
        let latest = repo.load_latest().unwrap().unwrap();
        assert_eq!(latest.turn.turn_number, 4);
        assert_eq!(repo.delete_range(0, 10).unwrap(), 2);
        assert!(repo.load_latest().unwrap().is_none());
    }

    #[test]
    fn answers_update_stored_profile() {
        let repo = InMemoryProfileRepo::new();
        repo.get_or_create("ana", "Ana").unwrap();

        let rating = repo
            .record_answer("ana", RatingChange::new(Difficulty::Medium, true))
            .unwrap();
        repo.record_match("ana", true).unwrap();

        let profile = repo.get("ana").unwrap().unwrap();
        assert_eq!(profile.rating, rating);
        assert_eq!(profile.questions_correct, 1);
        assert_eq!(profile.matches_won, 1);
    }

    #[test]
    fn unknown_profile_is_reported() {
        let repo = InMemoryProfileRepo::new();
        let err = repo.record_match("ghost", false).unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownProfile(id) if id == "ghost"));
    }
}
