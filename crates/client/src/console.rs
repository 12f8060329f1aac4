//! Interactive participant reading decisions from stdin.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use trails_core::{
    Answer, Destination, GameState, IntersectionChoice, Landing, PlayerId, PlayerState, Question,
};
use trails_runtime::{AnswerChoice, InputProvider, ProviderKind, Result, RuntimeError};

pub struct ConsoleProvider {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleProvider {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    async fn ask(&self, prompt: &str) -> Result<String> {
        print!("{prompt} ");
        let _ = std::io::stdout().flush();

        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(line)) => Ok(line.trim().to_owned()),
            Ok(None) => Err(closed("stdin closed")),
            Err(err) => Err(closed(&err.to_string())),
        }
    }
}

impl Default for ConsoleProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn closed(message: &str) -> RuntimeError {
    RuntimeError::ProviderFailed {
        kind: ProviderKind::Interactive,
        message: message.to_owned(),
    }
}

/// 1-based menu pick into a 0-based index below `len`.
fn parse_pick(input: &str, len: usize) -> Option<usize> {
    let pick = input.parse::<usize>().ok()?;
    (1..=len).contains(&pick).then(|| pick - 1)
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "yes" => Some(true),
        "f" | "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

#[async_trait]
impl InputProvider for ConsoleProvider {
    async fn roll(&self, player: &PlayerState, _state: &GameState) -> Result<Option<u32>> {
        loop {
            let prompt = format!(
                "\n{} ({} lives, at {}): press Enter to roll, or type a number:",
                player.profile.display_name, player.lives, player.landing
            );
            let input = self.ask(&prompt).await?;
            if input.is_empty() {
                return Ok(None);
            }
            match input.parse::<u32>() {
                Ok(roll) if roll > 0 => return Ok(Some(roll)),
                _ => println!("A roll is a positive number."),
            }
        }
    }

    async fn choose_route(
        &self,
        player: &PlayerState,
        at: &Landing,
        destinations: &[Destination],
    ) -> Result<IntersectionChoice> {
        println!("{} reached the crossing at {}:", player.profile.display_name, at);
        println!("  0) stay on {}", at.path);
        for (index, destination) in destinations.iter().enumerate() {
            println!("  {}) take {}", index + 1, destination.entry());
        }
        loop {
            let input = self.ask("Route:").await?;
            if input.is_empty() || input == "0" {
                return Ok(IntersectionChoice::Stay);
            }
            match parse_pick(&input, destinations.len()) {
                Some(index) => return Ok(IntersectionChoice::Take(index)),
                None => println!("Pick 0-{}.", destinations.len()),
            }
        }
    }

    async fn answer(
        &self,
        player: &PlayerState,
        question: &Question,
        can_skip: bool,
    ) -> Result<AnswerChoice> {
        println!(
            "\n❓ [{}] {}",
            question.difficulty(),
            question.prompt()
        );
        if let Question::MultipleChoice { options, .. } = question {
            for (index, option) in options.iter().enumerate() {
                println!("  {}) {}", index + 1, option);
            }
        }
        if can_skip {
            println!("  (type 'skip' to use {}'s skip)", player.profile.display_name);
        }

        loop {
            let input = self.ask("Answer:").await?;
            if can_skip && input.eq_ignore_ascii_case("skip") {
                return Ok(AnswerChoice::Skip);
            }
            let answer = match question {
                Question::MultipleChoice { options, .. } => {
                    parse_pick(&input, options.len()).map(Answer::Choice)
                }
                Question::TrueFalse { .. } => parse_bool(&input).map(Answer::Bool),
                Question::OpenAnswer { .. } => (!input.is_empty()).then(|| Answer::Text(input)),
            };
            match answer {
                Some(answer) => return Ok(AnswerChoice::Answer(answer)),
                None => println!("That is not a valid answer here."),
            }
        }
    }

    async fn choose_player(
        &self,
        player: &PlayerState,
        candidates: &[PlayerId],
        state: &GameState,
    ) -> Result<Option<PlayerId>> {
        println!("{} may swap places with:", player.profile.display_name);
        for (index, id) in candidates.iter().enumerate() {
            let name = state
                .player(*id)
                .map(|other| format!("{} at {}", other.profile.display_name, other.landing))
                .unwrap_or_else(|| id.to_string());
            println!("  {}) {}", index + 1, name);
        }
        loop {
            let input = self.ask("Swap with (Enter for random):").await?;
            if input.is_empty() {
                return Ok(None);
            }
            match parse_pick(&input, candidates.len()) {
                Some(index) => return Ok(candidates.get(index).copied()),
                None => println!("Pick 1-{}.", candidates.len()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_picks_are_one_based() {
        assert_eq!(parse_pick("1", 3), Some(0));
        assert_eq!(parse_pick("3", 3), Some(2));
        assert_eq!(parse_pick("0", 3), None);
        assert_eq!(parse_pick("4", 3), None);
        assert_eq!(parse_pick("x", 3), None);
    }

    #[test]
    fn booleans_accept_short_forms() {
        assert_eq!(parse_bool("Y"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
