//! Questions and the reward table applied to answers.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::GameConfig;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A participant's answer to a [`Question`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Answer {
    Choice(usize),
    Text(String),
    Bool(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Question {
    MultipleChoice {
        id: u32,
        difficulty: Difficulty,
        prompt: String,
        options: Vec<String>,
        correct: usize,
    },
    OpenAnswer {
        id: u32,
        difficulty: Difficulty,
        prompt: String,
        /// Accepted answers, compared case-insensitively.
        accepted: Vec<String>,
    },
    TrueFalse {
        id: u32,
        difficulty: Difficulty,
        prompt: String,
        answer: bool,
    },
}

impl Question {
    pub fn id(&self) -> u32 {
        match self {
            Self::MultipleChoice { id, .. }
            | Self::OpenAnswer { id, .. }
            | Self::TrueFalse { id, .. } => *id,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Self::MultipleChoice { difficulty, .. }
            | Self::OpenAnswer { difficulty, .. }
            | Self::TrueFalse { difficulty, .. } => *difficulty,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Self::MultipleChoice { prompt, .. }
            | Self::OpenAnswer { prompt, .. }
            | Self::TrueFalse { prompt, .. } => prompt,
        }
    }

    /// Grades `answer`. Answers of the wrong shape are incorrect.
    pub fn is_correct(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (Self::MultipleChoice { correct, .. }, Answer::Choice(choice)) => correct == choice,
            (Self::OpenAnswer { accepted, .. }, Answer::Text(text)) => {
                let text = text.trim();
                accepted
                    .iter()
                    .any(|candidate| candidate.trim().eq_ignore_ascii_case(text))
            }
            (Self::TrueFalse { answer: truth, .. }, Answer::Bool(value)) => truth == value,
            _ => false,
        }
    }

    /// An answer [`Question::is_correct`] accepts. Open answers use the first accepted text.
    pub fn correct_answer(&self) -> Answer {
        match self {
            Self::MultipleChoice { correct, .. } => Answer::Choice(*correct),
            Self::OpenAnswer { accepted, .. } => {
                Answer::Text(accepted.first().cloned().unwrap_or_default())
            }
            Self::TrueFalse { answer, .. } => Answer::Bool(*answer),
        }
    }

    /// Grades `answer` into the response the engine consumes.
    pub fn respond(&self, answer: &Answer) -> QuestionResponse {
        QuestionResponse::Answered {
            difficulty: self.difficulty(),
            correct: self.is_correct(answer),
        }
    }
}

/// Outcome of a question prompt as reported to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionResponse {
    Answered { difficulty: Difficulty, correct: bool },
    /// The participant spent a skip-question charge.
    Skipped,
}

/// Effect applied for an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionReward {
    Advance(u32),
    ReturnToPreviousLanding,
    ExtraTurn,
    LoseLife,
    GainLife,
    SkipTurn,
}

impl QuestionReward {
    /// Reward table.
    ///
    /// | difficulty | correct     | incorrect                 |
    /// |------------|-------------|---------------------------|
    /// | easy       | advance 2   | return to previous landing|
    /// | medium     | extra turn  | lose a life               |
    /// | hard       | gain a life | skip next turn            |
    pub fn for_result(difficulty: Difficulty, correct: bool, config: &GameConfig) -> Self {
        match (difficulty, correct) {
            (Difficulty::Easy, true) => Self::Advance(config.easy_reward_steps),
            (Difficulty::Easy, false) => Self::ReturnToPreviousLanding,
            (Difficulty::Medium, true) => Self::ExtraTurn,
            (Difficulty::Medium, false) => Self::LoseLife,
            (Difficulty::Hard, true) => Self::GainLife,
            (Difficulty::Hard, false) => Self::SkipTurn,
        }
    }
}
