//! Rolling usage statistics.
//!
//! The aggregator is the only writer of the `statistics` record. It folds
//! each completed session into the cumulative totals and maintains the
//! consecutive-day streak; break completions count toward the streak just
//! like focus completions.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::database::{Database, KEY_STATISTICS};
use super::sessions::SessionRecord;
use crate::timer::Phase;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Cumulative focus seconds.
    pub total_focus_time: u64,
    /// Cumulative break seconds (short and long breaks together).
    pub total_break_time: u64,
    pub completed_sessions: u64,
    pub daily_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_session_date: Option<NaiveDate>,
}

/// Fold one session into the statistics, with `today` the calendar date
/// the recording happens on.
///
/// Streak rule: first session ever starts at 1; another session the same
/// day changes nothing; a session exactly one day after the last extends
/// the streak; anything else (a gap, or a last date in the future) starts
/// over at 1.
fn fold_session(mut stats: Statistics, record: &SessionRecord, today: NaiveDate) -> Statistics {
    match record.phase {
        Phase::Focus => stats.total_focus_time += record.duration,
        Phase::Break | Phase::LongBreak => stats.total_break_time += record.duration,
    }
    if record.completed {
        stats.completed_sessions += 1;
    }
    stats.daily_streak = match stats.last_session_date {
        None => 1,
        Some(last) if last == today => stats.daily_streak,
        Some(last) if today.pred_opt() == Some(last) => stats.daily_streak + 1,
        Some(_) => 1,
    };
    stats.last_session_date = Some(today);
    stats
}

/// Store and aggregator for [`Statistics`], backed by the kv table.
pub struct StatsStore<'a> {
    db: &'a Database,
}

impl<'a> StatsStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read the persisted statistics, or zeroed defaults. Never fails.
    pub fn get(&self) -> Statistics {
        match self.db.kv_get(KEY_STATISTICS) {
            Ok(Some(json)) => match serde_json::from_str::<Statistics>(&json) {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed statistics, using defaults");
                    Statistics::default()
                }
            },
            Ok(None) => Statistics::default(),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read statistics, using defaults");
                Statistics::default()
            }
        }
    }

    /// Overwrite the persisted statistics (backup restore path).
    pub fn set(&self, stats: &Statistics) {
        match serde_json::to_string(stats) {
            Ok(json) => {
                if let Err(e) = self.db.kv_set(KEY_STATISTICS, &json) {
                    tracing::warn!(error = %e, "cannot persist statistics");
                }
            }
            Err(e) => tracing::warn!(error = %e, "cannot serialize statistics"),
        }
    }

    /// Fold a freshly recorded session into the statistics and persist.
    ///
    /// Called by the session recorder, once per record regardless of phase.
    /// Returns the updated statistics.
    pub fn record_session(&self, record: &SessionRecord) -> Statistics {
        let today = Local::now().date_naive();
        let stats = fold_session(self.get(), record, today);
        self.set(&stats);
        stats
    }
}
