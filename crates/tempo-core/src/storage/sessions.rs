//! Session history and the recorder that feeds it.
//!
//! Completed intervals become immutable [`SessionRecord`]s in an ordered,
//! append-only history under the `sessions` key. The recorder computes the
//! duration from the phase's configured length rather than wall clock, so a
//! drifting tick source cannot skew the totals, then hands the record to
//! the statistics aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::ConfigStore;
use super::database::{Database, KEY_SESSIONS};
use super::stats::{Statistics, StatsStore};
use crate::timer::Phase;

/// Immutable log entry for one completed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub phase: Phase,
    pub completed: bool,
    /// Seconds, from the phase's configured length.
    pub duration: u64,
}

/// Store for the ordered session history, backed by the kv table.
pub struct SessionStore<'a> {
    db: &'a Database,
}

impl<'a> SessionStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// The full history, oldest first.
    ///
    /// A corrupt or absent record reads as an empty history. Never fails.
    pub fn history(&self) -> Vec<SessionRecord> {
        match self.db.kv_get(KEY_SESSIONS) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(sessions) => sessions,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed session history, treating as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read session history, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append a record; prior entries are never rewritten.
    pub fn append(&self, record: SessionRecord) {
        let mut history = self.history();
        history.push(record);
        self.replace(history);
    }

    /// Overwrite the whole history (backup restore path).
    pub fn replace(&self, history: Vec<SessionRecord>) {
        match serde_json::to_string(&history) {
            Ok(json) => {
                if let Err(e) = self.db.kv_set(KEY_SESSIONS, &json) {
                    tracing::warn!(error = %e, "cannot persist session history");
                }
            }
            Err(e) => tracing::warn!(error = %e, "cannot serialize session history"),
        }
    }
}

/// Persists completed intervals and triggers the statistics aggregator.
pub struct SessionRecorder<'a> {
    db: &'a Database,
}

impl<'a> SessionRecorder<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Record one completed interval and return the updated statistics.
    pub fn record(
        &self,
        phase: Phase,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        completed: bool,
    ) -> Statistics {
        let config = ConfigStore::new(self.db).get();
        let record = SessionRecord {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            phase,
            completed,
            duration: u64::from(config.phase_seconds(phase)),
        };
        SessionStore::new(self.db).append(record.clone());
        StatsStore::new(self.db).record_session(&record)
    }
}
