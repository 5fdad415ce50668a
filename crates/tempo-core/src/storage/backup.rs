//! Backup and restore of all persisted records.
//!
//! The backup blob is one JSON object with up to four sections, matching
//! the persisted record keys. Import applies each present section
//! independently; a blob that is not valid JSON is rejected as a whole and
//! leaves prior state untouched.

use serde::{Deserialize, Serialize};

use super::config::{ConfigStore, TimerConfig};
use super::database::{Database, KEY_PREFERENCES, KEY_SESSIONS, KEY_STATISTICS, KEY_TIMER_CONFIG};
use super::preferences::{Preferences, PreferencesStore};
use super::sessions::{SessionRecord, SessionStore};
use super::stats::{Statistics, StatsStore};
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupBlob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_config: Option<TimerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<SessionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

/// Serialize all four records into one blob.
///
/// Reads go through the stores, so the exported values are the same
/// merged/clamped ones any reader would see.
///
/// # Errors
/// Returns an error if the blob cannot be serialized.
pub fn export_all(db: &Database) -> Result<String> {
    let blob = BackupBlob {
        preferences: Some(PreferencesStore::new(db).get()),
        timer_config: Some(ConfigStore::new(db).get()),
        sessions: Some(SessionStore::new(db).history()),
        statistics: Some(StatsStore::new(db).get()),
    };
    Ok(serde_json::to_string_pretty(&blob)?)
}

/// Restore from a backup blob. Returns whether the import was applied.
///
/// Each section present in the blob replaces the corresponding record;
/// absent sections are left alone. A malformed blob yields `false` and
/// mutates nothing.
pub fn import_all(db: &Database, blob: &str) -> bool {
    let blob: BackupBlob = match serde_json::from_str(blob) {
        Ok(blob) => blob,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting malformed backup blob");
            return false;
        }
    };
    if let Some(prefs) = blob.preferences {
        PreferencesStore::new(db).set(prefs);
    }
    if let Some(config) = blob.timer_config {
        ConfigStore::new(db).set(config);
    }
    if let Some(sessions) = blob.sessions {
        SessionStore::new(db).replace(sessions);
    }
    if let Some(stats) = blob.statistics {
        StatsStore::new(db).set(&stats);
    }
    true
}

/// Delete all four persisted records.
pub fn clear_all(db: &Database) {
    for key in [KEY_PREFERENCES, KEY_TIMER_CONFIG, KEY_SESSIONS, KEY_STATISTICS] {
        if let Err(e) = db.kv_delete(key) {
            tracing::warn!(key, error = %e, "cannot clear record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_blob_is_rejected_without_mutation() {
        let db = Database::open_memory().unwrap();
        let store = ConfigStore::new(&db);
        let mut cfg = store.get();
        cfg.focus_duration = 30.0;
        store.set(cfg);

        assert!(!import_all(&db, "definitely not json"));
        assert_eq!(store.get().focus_duration, 30.0);
    }

    #[test]
    fn partial_blob_applies_only_present_sections() {
        let db = Database::open_memory().unwrap();
        let prefs_before = PreferencesStore::new(&db).get();

        assert!(import_all(&db, r#"{"timer_config":{"focusDuration":52}}"#));
        assert_eq!(ConfigStore::new(&db).get().focus_duration, 52.0);
        assert_eq!(PreferencesStore::new(&db).get(), prefs_before);
    }

    #[test]
    fn clear_all_removes_every_record() {
        let db = Database::open_memory().unwrap();
        // Seed all four records.
        ConfigStore::new(&db).get();
        PreferencesStore::new(&db).get();
        SessionStore::new(&db).replace(Vec::new());
        StatsStore::new(&db).set(&Statistics::default());

        clear_all(&db);
        for key in [KEY_PREFERENCES, KEY_TIMER_CONFIG, KEY_SESSIONS, KEY_STATISTICS] {
            assert!(db.kv_get(key).unwrap().is_none());
        }
    }
}
