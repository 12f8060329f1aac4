use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use trails_core::{Difficulty, PlayerState, Question};

use crate::api::{ProviderKind, QuestionProvider, Result, RuntimeError};
use crate::repository::{ProfileRepository, RatingChange};

/// Rating thresholds for picking a question difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyBands {
    pub medium_from: i32,
    pub hard_from: i32,
}

impl DifficultyBands {
    pub const fn difficulty_for(&self, rating: i32) -> Difficulty {
        if rating >= self.hard_from {
            Difficulty::Hard
        } else if rating >= self.medium_from {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

impl Default for DifficultyBands {
    fn default() -> Self {
        Self {
            medium_from: 1100,
            hard_from: 1300,
        }
    }
}

/// Rotates through a fixed bank, preferring the difficulty matching the
/// participant's rating. Ratings come from the profile repository when one
/// is attached, so answers earlier in the match shift later picks.
pub struct QuestionBank {
    by_difficulty: HashMap<Difficulty, Vec<Question>>,
    cursors: Mutex<HashMap<Difficulty, usize>>,
    bands: DifficultyBands,
    profiles: Option<Arc<dyn ProfileRepository>>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(RuntimeError::EmptyQuestionBank);
        }
        let mut by_difficulty: HashMap<Difficulty, Vec<Question>> = HashMap::new();
        for question in questions {
            by_difficulty
                .entry(question.difficulty())
                .or_default()
                .push(question);
        }
        Ok(Self {
            by_difficulty,
            cursors: Mutex::new(HashMap::new()),
            bands: DifficultyBands::default(),
            profiles: None,
        })
    }

    pub fn with_bands(mut self, bands: DifficultyBands) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileRepository>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn len(&self) -> usize {
        self.by_difficulty.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rating_of(&self, player: &PlayerState) -> Result<i32> {
        if let Some(profiles) = &self.profiles
            && let Some(profile) = profiles.get(&player.profile.id)?
        {
            return Ok(profile.rating);
        }
        Ok(player.profile.rating)
    }

    /// Closest populated difficulty to `wanted`, easier first on ties.
    fn nearest(&self, wanted: Difficulty) -> Option<Difficulty> {
        Difficulty::iter()
            .filter(|difficulty| self.by_difficulty.contains_key(difficulty))
            .min_by_key(|difficulty| ((*difficulty as i32) - (wanted as i32)).abs())
    }
}

#[async_trait]
impl QuestionProvider for QuestionBank {
    async fn generate(&self, player: &PlayerState) -> Result<Question> {
        let rating = self.rating_of(player)?;
        let wanted = self.bands.difficulty_for(rating);
        let difficulty = self.nearest(wanted).ok_or(RuntimeError::EmptyQuestionBank)?;
        let pool = self
            .by_difficulty
            .get(&difficulty)
            .ok_or(RuntimeError::EmptyQuestionBank)?;

        let mut cursors = self.cursors.lock().map_err(|_| RuntimeError::ProviderFailed {
            kind: ProviderKind::Questions,
            message: "cursor lock poisoned".into(),
        })?;
        let cursor = cursors.entry(difficulty).or_insert(0);
        let question = pool
            .get(*cursor % pool.len())
            .cloned()
            .ok_or(RuntimeError::EmptyQuestionBank)?;
        *cursor += 1;

        debug!(
            target: "runtime::questions",
            player = %player.id,
            rating,
            %wanted,
            %difficulty,
            question = question.id(),
            "question picked"
        );
        Ok(question)
    }

    async fn record_answer(
        &self,
        player: &PlayerState,
        question: &Question,
        correct: bool,
    ) -> Result<i32> {
        let Some(profiles) = &self.profiles else {
            return Ok(0);
        };
        if profiles.get(&player.profile.id)?.is_none() {
            debug!(target: "runtime::questions", profile = %player.profile.id, "no stored profile, answer not recorded");
            return Ok(0);
        }
        let change = RatingChange::new(question.difficulty(), correct);
        match profiles.record_answer(&player.profile.id, change) {
            Ok(rating) => {
                debug!(target: "runtime::questions", profile = %player.profile.id, rating, "rating updated");
                Ok(change.delta())
            }
            Err(err) => {
                warn!(target: "runtime::questions", profile = %player.profile.id, error = %err, "failed to record answer");
                Err(err.into())
            }
        }
    }
}
