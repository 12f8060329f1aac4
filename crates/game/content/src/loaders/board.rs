//! Board layout loader.

use std::path::Path;

use crate::layout::{BoardLayout, BoardSetup};
use crate::loaders::{LoadResult, read_file};

/// Standard board shipped with the crate.
pub const STANDARD_BOARD: &str = include_str!("../../data/board.ron");

/// Loader for board layouts from RON files.
pub struct BoardLoader;

impl BoardLoader {
    pub fn load(path: &Path) -> LoadResult<BoardSetup> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid board {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<BoardSetup> {
        let layout: BoardLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON: {}", e))?;
        let setup = layout.build()?;
        Ok(setup)
    }

    pub fn standard() -> LoadResult<BoardSetup> {
        Self::parse(STANDARD_BOARD)
    }
}
