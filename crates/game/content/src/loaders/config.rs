//! Game configuration loader.

use std::path::Path;

use trails_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.dice_count == 0 || config.dice_sides == 0 {
            anyhow::bail!("Config needs at least one die with at least one side");
        }
        if config.region_speed_denominator == 0 {
            anyhow::bail!("region_speed_denominator must be positive");
        }
        Ok(config)
    }
}
