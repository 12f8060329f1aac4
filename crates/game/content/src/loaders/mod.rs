//! Content loaders for reading game data from files.
//!
//! Boards and question banks are RON, rules are TOML. Every loader also
//! offers a `parse` entry point so embedded content goes through the same
//! validation as files on disk.

pub mod board;
pub mod config;
pub mod factory;
pub mod questions;

pub use board::BoardLoader;
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use questions::QuestionLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
