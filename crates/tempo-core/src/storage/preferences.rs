//! User-facing preference toggles.
//!
//! Persisted as JSON under the `preferences` key. Missing fields backfill
//! from defaults on read, so records written by older versions keep
//! working. Values are trusted as given; there is nothing to validate.

use serde::{Deserialize, Serialize};

use super::database::{Database, KEY_PREFERENCES};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_pomodoros: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            notifications: true,
            sound: true,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}

/// Store for [`Preferences`], backed by the kv table.
pub struct PreferencesStore<'a> {
    db: &'a Database,
}

impl<'a> PreferencesStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read the persisted preferences with defaults merged in.
    ///
    /// Absent or malformed data yields the defaults; the first-ever read
    /// seeds the store with them. Never fails.
    pub fn get(&self) -> Preferences {
        match self.db.kv_get(KEY_PREFERENCES) {
            Ok(Some(json)) => match serde_json::from_str::<Preferences>(&json) {
                Ok(prefs) => prefs,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed preferences, using defaults");
                    Preferences::default()
                }
            },
            Ok(None) => {
                let prefs = Preferences::default();
                self.set(prefs.clone());
                prefs
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot read preferences, using defaults");
                Preferences::default()
            }
        }
    }

    /// Persist the full merged record. A failed write is logged and dropped.
    pub fn set(&self, prefs: Preferences) {
        match serde_json::to_string(&prefs) {
            Ok(json) => {
                if let Err(e) = self.db.kv_set(KEY_PREFERENCES, &json) {
                    tracing::warn!(error = %e, "cannot persist preferences");
                }
            }
            Err(e) => tracing::warn!(error = %e, "cannot serialize preferences"),
        }
    }
}
