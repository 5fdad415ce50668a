pub mod backup;
mod config;
pub mod database;
mod preferences;
mod sessions;
mod stats;

pub use config::{ConfigStore, TimerConfig};
pub use database::Database;
pub use preferences::{Preferences, PreferencesStore, Theme};
pub use sessions::{SessionRecord, SessionRecorder, SessionStore};
pub use stats::{Statistics, StatsStore};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `~/.config/tempo` by default, `~/.config/tempo-dev` when `TEMPO_ENV=dev`,
/// or whatever `TEMPO_DATA_DIR` points at (used by tests for isolation).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = if let Ok(dir) = std::env::var("TEMPO_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("TEMPO_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("tempo-dev")
        } else {
            base_dir.join("tempo")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
