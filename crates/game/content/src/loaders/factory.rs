//! Content factory for loading a complete data directory.

use std::path::{Path, PathBuf};

use trails_core::{GameConfig, Question};

use crate::layout::BoardSetup;
use crate::loaders::{BoardLoader, ConfigLoader, LoadResult, QuestionLoader};

/// Everything a match needs from disk.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub board: BoardSetup,
    pub questions: Vec<Question>,
}

impl Content {
    /// Built-in content: standard board, default rules, bundled questions.
    pub fn standard() -> LoadResult<Self> {
        Ok(Self {
            config: GameConfig::default(),
            board: BoardLoader::standard()?,
            questions: QuestionLoader::standard()?,
        })
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── board.ron
/// └── questions.ron
/// ```
///
/// Missing files fall back to the built-in content.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the board from `board.ron`.
    pub fn load_board(&self) -> LoadResult<BoardSetup> {
        let path = self.data_dir.join("board.ron");
        if !path.exists() {
            return BoardLoader::standard();
        }
        BoardLoader::load(&path)
    }

    /// Load the question bank from `questions.ron`.
    pub fn load_questions(&self) -> LoadResult<Vec<Question>> {
        let path = self.data_dir.join("questions.ron");
        if !path.exists() {
            return QuestionLoader::standard();
        }
        QuestionLoader::load(&path)
    }

    pub fn load(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let board = self.load_board()?;
        if board.board.path_len("main").is_some_and(|len| len <= config.final_index) {
            anyhow::bail!(
                "Main path of {} is shorter than final_index {}",
                self.data_dir.join("board.ron").display(),
                config.final_index
            );
        }
        Ok(Content {
            config,
            board,
            questions: self.load_questions()?,
        })
    }
}
