//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use trails_runtime::RuntimeConfig;

/// Configuration required to bootstrap a match from the terminal.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Content directory with `config.toml`, `board.ron`, `questions.ron`.
    pub content_dir: Option<PathBuf>,
    /// Where snapshots and profiles are kept.
    pub save_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub enable_persistence: bool,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRAILS_CONTENT_DIR` - Content directory (default: built-in content)
    /// - `TRAILS_SAVE_DIR` - Save data directory (default: platform-specific)
    /// - `TRAILS_SESSION_ID` - Session identifier for logs and snapshots
    /// - `TRAILS_PERSISTENCE` - Save snapshots every turn (default: false)
    /// - plus the runtime's `TRAILS_EVENT_BUFFER`, `TRAILS_COMMAND_BUFFER`, `TRAILS_MAX_TICKS`
    pub fn from_env() -> Self {
        let mut config = Self {
            runtime: RuntimeConfig::from_env(),
            ..Self::default()
        };

        config.content_dir = env::var("TRAILS_CONTENT_DIR").ok().map(PathBuf::from);
        config.save_dir = env::var("TRAILS_SAVE_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("TRAILS_SESSION_ID").ok();

        if let Some(enable) = read_env::<bool>("TRAILS_PERSISTENCE") {
            config.enable_persistence = enable;
        } else if env::var("TRAILS_PERSISTENCE").is_ok() {
            // Accept a bare variable as "true"
            config.enable_persistence = true;
        }

        config
    }

    /// Save directory, falling back to the platform data directory.
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir
            .clone()
            .or_else(RuntimeConfig::default_data_dir)
            .unwrap_or_else(|| env::temp_dir().join("trails"))
    }

    /// Snapshots of one session live in their own directory.
    pub fn snapshot_dir(&self, session_id: &str) -> PathBuf {
        self.resolved_save_dir().join("sessions").join(session_id)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
