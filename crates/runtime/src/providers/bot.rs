use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use trails_core::{
    Answer, Destination, GameState, IntersectionChoice, Landing, PlayerId, PlayerState, Question,
};

use crate::api::{AnswerChoice, InputProvider, ProviderKind, Result, RuntimeError};

/// Automated participant.
///
/// Answers correctly with probability `accuracy`, takes a random route at
/// intersections, and picks a random swap partner. Seeded so bot matches
/// replay identically.
pub struct BotProvider {
    accuracy: f64,
    rng: Mutex<StdRng>,
}

impl BotProvider {
    pub fn new(seed: u64, accuracy: f64) -> Self {
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T> {
        let mut rng = self.rng.lock().map_err(|_| RuntimeError::ProviderFailed {
            kind: ProviderKind::Bot,
            message: "rng lock poisoned".into(),
        })?;
        Ok(f(&mut rng))
    }
}

#[async_trait]
impl InputProvider for BotProvider {
    async fn choose_route(
        &self,
        player: &PlayerState,
        at: &Landing,
        destinations: &[Destination],
    ) -> Result<IntersectionChoice> {
        // One extra slot for staying on the current path.
        let pick = self.with_rng(|rng| rng.gen_range(0..=destinations.len()))?;
        let choice = match pick {
            0 => IntersectionChoice::Stay,
            n => IntersectionChoice::Take(n - 1),
        };
        debug!(target: "runtime::bot", player = %player.id, %at, ?choice, "route chosen");
        Ok(choice)
    }

    async fn answer(
        &self,
        player: &PlayerState,
        question: &Question,
        _can_skip: bool,
    ) -> Result<AnswerChoice> {
        let knows = self.with_rng(|rng| rng.gen_bool(self.accuracy))?;
        debug!(target: "runtime::bot", player = %player.id, question = question.id(), knows, "answering");
        if knows {
            return Ok(AnswerChoice::Answer(question.correct_answer()));
        }
        let wrong = match question {
            Question::MultipleChoice {
                options, correct, ..
            } => Answer::Choice((correct + 1) % options.len().max(2)),
            Question::OpenAnswer { .. } => Answer::Text(String::new()),
            Question::TrueFalse { answer, .. } => Answer::Bool(!answer),
        };
        Ok(AnswerChoice::Answer(wrong))
    }

    async fn choose_player(
        &self,
        _player: &PlayerState,
        candidates: &[PlayerId],
        _state: &GameState,
    ) -> Result<Option<PlayerId>> {
        if candidates.is_empty() {
            return Ok(None);
        }
        let index = self.with_rng(|rng| rng.gen_range(0..candidates.len()))?;
        Ok(candidates.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use trails_core::{Difficulty, Element, ProfileRef};

    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(
            PlayerId(1),
            Element::Air,
            ProfileRef::guest(PlayerId(1)),
            Landing::new("main", 0),
            3,
        )
    }

    fn question() -> Question {
        Question::MultipleChoice {
            id: 1,
            difficulty: Difficulty::Easy,
            prompt: "2 + 2".into(),
            options: vec!["3".into(), "4".into(), "5".into()],
            correct: 1,
        }
    }

    #[tokio::test]
    async fn perfect_bot_always_answers_correctly() {
        let bot = BotProvider::new(3, 1.0);
        for _ in 0..20 {
            let AnswerChoice::Answer(answer) = bot.answer(&player(), &question(), true).await.unwrap()
            else {
                panic!("bot never skips");
            };
            assert!(question().is_correct(&answer));
        }
    }

    #[tokio::test]
    async fn hopeless_bot_always_misses() {
        let bot = BotProvider::new(3, 0.0);
        let AnswerChoice::Answer(answer) = bot.answer(&player(), &question(), false).await.unwrap()
        else {
            panic!("bot never skips");
        };
        assert!(!question().is_correct(&answer));
    }

    #[tokio::test]
    async fn route_choice_stays_in_range() {
        let bot = BotProvider::new(9, 0.5);
        let destinations = vec![Destination::new("reef_shortcut", 0, true)];
        for _ in 0..20 {
            let choice = bot
                .choose_route(&player(), &Landing::new("main", 12), &destinations)
                .await
                .unwrap();
            assert!(matches!(
                choice,
                IntersectionChoice::Stay | IntersectionChoice::Take(0)
            ));
        }
    }
}
