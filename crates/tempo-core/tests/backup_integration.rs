//! Backup export/import round trips against a populated database.

use chrono::Utc;
use tempo_core::storage::backup;
use tempo_core::{
    ConfigStore, Database, Phase, PreferencesStore, SessionRecorder, SessionStore, StatsStore,
    Theme, TimerConfig,
};

fn populated_db() -> Database {
    let db = Database::open_memory().unwrap();
    ConfigStore::new(&db).set(TimerConfig {
        focus_duration: 50.0,
        break_duration: 10.0,
        long_break_duration: 30.0,
        sessions_until_long_break: 2,
    });
    let mut prefs = PreferencesStore::new(&db).get();
    prefs.theme = Theme::Dark;
    prefs.auto_start_pomodoros = true;
    PreferencesStore::new(&db).set(prefs);
    let now = Utc::now();
    SessionRecorder::new(&db).record(Phase::Focus, now, now, true);
    SessionRecorder::new(&db).record(Phase::Break, now, now, true);
    db
}

#[test]
fn import_of_export_reproduces_identical_snapshot() {
    let db = populated_db();
    let blob = backup::export_all(&db).unwrap();

    let config = ConfigStore::new(&db).get();
    let prefs = PreferencesStore::new(&db).get();
    let sessions = SessionStore::new(&db).history();
    let stats = StatsStore::new(&db).get();

    let restored = Database::open_memory().unwrap();
    assert!(backup::import_all(&restored, &blob));

    assert_eq!(ConfigStore::new(&restored).get(), config);
    assert_eq!(PreferencesStore::new(&restored).get(), prefs);
    assert_eq!(SessionStore::new(&restored).history(), sessions);
    assert_eq!(StatsStore::new(&restored).get(), stats);
}

#[test]
fn clear_then_import_restores_everything() {
    let db = populated_db();
    let blob = backup::export_all(&db).unwrap();
    let sessions_before = SessionStore::new(&db).history();

    backup::clear_all(&db);
    assert!(SessionStore::new(&db).history().is_empty());

    assert!(backup::import_all(&db, &blob));
    assert_eq!(SessionStore::new(&db).history(), sessions_before);
    assert_eq!(ConfigStore::new(&db).get().focus_duration, 50.0);
}

#[test]
fn malformed_blob_fails_whole_import() {
    let db = populated_db();
    let config_before = ConfigStore::new(&db).get();
    let sessions_before = SessionStore::new(&db).history();

    assert!(!backup::import_all(&db, "{\"timer_config\": "));

    assert_eq!(ConfigStore::new(&db).get(), config_before);
    assert_eq!(SessionStore::new(&db).history(), sessions_before);
}

#[test]
fn imported_config_is_clamped() {
    let db = Database::open_memory().unwrap();
    assert!(backup::import_all(
        &db,
        r#"{"timer_config":{"focusDuration":-5,"breakDuration":0.02,"longBreakDuration":15,"sessionsUntilLongBreak":0}}"#
    ));
    let cfg = ConfigStore::new(&db).get();
    assert_eq!(cfg.focus_duration, 25.0);
    assert_eq!(cfg.break_duration, 0.1);
    assert_eq!(cfg.sessions_until_long_break, 1);
}

#[test]
fn blob_uses_the_four_record_keys() {
    let db = populated_db();
    let blob = backup::export_all(&db).unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    for key in ["preferences", "timer_config", "sessions", "statistics"] {
        assert!(value.get(key).is_some(), "missing section {key}");
    }
}
