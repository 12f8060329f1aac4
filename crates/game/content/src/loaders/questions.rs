//! Question bank loader.

use std::collections::HashSet;
use std::path::Path;

use trails_core::Question;

use crate::loaders::{LoadResult, read_file};

pub const STANDARD_QUESTIONS: &str = include_str!("../../data/questions.ron");

/// Loader for question banks from RON files.
pub struct QuestionLoader;

impl QuestionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Question>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Question>> {
        let questions: Vec<Question> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse questions RON: {}", e))?;

        let mut ids = HashSet::new();
        for question in &questions {
            if !ids.insert(question.id()) {
                anyhow::bail!("Duplicate question id {}", question.id());
            }
            match question {
                Question::MultipleChoice {
                    id,
                    options,
                    correct,
                    ..
                } if *correct >= options.len() => {
                    anyhow::bail!(
                        "Question {} marks option {} correct but has {} options",
                        id,
                        correct,
                        options.len()
                    );
                }
                Question::OpenAnswer { id, accepted, .. } if accepted.is_empty() => {
                    anyhow::bail!("Question {} accepts no answer", id);
                }
                _ => {}
            }
        }
        Ok(questions)
    }

    pub fn standard() -> LoadResult<Vec<Question>> {
        Self::parse(STANDARD_QUESTIONS)
    }
}
