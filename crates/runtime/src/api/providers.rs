//! Asynchronous abstractions for sourcing participant decisions and questions.
//!
//! Runtime users plug in [`InputProvider`] implementations so a match can run
//! with human input, scripted fixtures, or bots, and a [`QuestionProvider`]
//! that picks questions for a participant's rating.
use async_trait::async_trait;
use trails_core::{
    Answer, Destination, GameState, IntersectionChoice, Landing, PlayerId, PlayerState, Question,
};

use super::errors::Result;

/// A participant's reply to a question prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerChoice {
    Answer(Answer),
    /// Spend a skip-question charge instead of answering.
    Skip,
}

/// Decisions a participant makes during a match.
#[async_trait]
pub trait InputProvider: Send + Sync {
    /// Dice sum for `player`, or `None` to let the engine roll.
    async fn roll(&self, _player: &PlayerState, _state: &GameState) -> Result<Option<u32>> {
        Ok(None)
    }

    /// Route to take at intersection `at`. `destinations` is never empty.
    async fn choose_route(
        &self,
        player: &PlayerState,
        at: &Landing,
        destinations: &[Destination],
    ) -> Result<IntersectionChoice>;

    /// Answer to `question`. `can_skip` is false when no skip charge is left.
    async fn answer(
        &self,
        player: &PlayerState,
        question: &Question,
        can_skip: bool,
    ) -> Result<AnswerChoice>;

    /// Participant to trade places with, or `None` to let the engine pick.
    async fn choose_player(
        &self,
        player: &PlayerState,
        candidates: &[PlayerId],
        state: &GameState,
    ) -> Result<Option<PlayerId>>;
}

/// Source of questions, typically rating-aware.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    async fn generate(&self, player: &PlayerState) -> Result<Question>;

    /// Reports how `player` did on `question` and returns the rating delta applied.
    async fn record_answer(
        &self,
        _player: &PlayerState,
        _question: &Question,
        _correct: bool,
    ) -> Result<i32> {
        Ok(0)
    }
}

/// Lets the engine roll, keeps the current path, and lets the engine pick
/// swap partners. Answers with the wrong shape so every question is missed.
/// Useful for testing or as a fallback.
pub struct PassiveProvider;

#[async_trait]
impl InputProvider for PassiveProvider {
    async fn choose_route(
        &self,
        _player: &PlayerState,
        _at: &Landing,
        _destinations: &[Destination],
    ) -> Result<IntersectionChoice> {
        Ok(IntersectionChoice::Stay)
    }

    async fn answer(
        &self,
        _player: &PlayerState,
        _question: &Question,
        _can_skip: bool,
    ) -> Result<AnswerChoice> {
        Ok(AnswerChoice::Answer(Answer::Text(String::new())))
    }

    async fn choose_player(
        &self,
        _player: &PlayerState,
        _candidates: &[PlayerId],
        _state: &GameState,
    ) -> Result<Option<PlayerId>> {
        Ok(None)
    }
}
