use serde::{Deserialize, Serialize};
use trails_core::{Difficulty, ProfileRef};

/// Rating a brand-new profile starts from.
pub const STARTING_RATING: i32 = 1000;

/// Stored participant profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub rating: i32,
    #[serde(default)]
    pub questions_answered: u32,
    #[serde(default)]
    pub questions_correct: u32,
    #[serde(default)]
    pub matches_played: u32,
    #[serde(default)]
    pub matches_won: u32,
}

impl Profile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            rating: STARTING_RATING,
            questions_answered: 0,
            questions_correct: 0,
            matches_played: 0,
            matches_won: 0,
        }
    }

    /// Snapshot handed to the engine when the participant is seated.
    pub fn to_profile_ref(&self) -> ProfileRef {
        ProfileRef::new(self.id.clone(), self.display_name.clone(), self.rating)
    }

    pub fn apply(&mut self, change: RatingChange) {
        self.questions_answered += 1;
        if change.correct {
            self.questions_correct += 1;
        }
        self.rating = (self.rating + change.delta()).max(0);
    }
}

/// Outcome of one graded answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingChange {
    pub difficulty: Difficulty,
    pub correct: bool,
}

impl RatingChange {
    pub const fn new(difficulty: Difficulty, correct: bool) -> Self {
        Self {
            difficulty,
            correct,
        }
    }

    /// Harder questions pay more when right and cost less when wrong.
    pub const fn delta(&self) -> i32 {
        match (self.difficulty, self.correct) {
            (Difficulty::Easy, true) => 5,
            (Difficulty::Medium, true) => 10,
            (Difficulty::Hard, true) => 20,
            (Difficulty::Easy, false) => -10,
            (Difficulty::Medium, false) => -5,
            (Difficulty::Hard, false) => -2,
        }
    }
}
