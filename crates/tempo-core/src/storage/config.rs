//! Timer duration configuration.
//!
//! Durations are minutes and may be fractional (0.1 minutes is the floor).
//! Out-of-range values are silently clamped rather than rejected -- the
//! timer always has something valid to run with. Persisted as JSON under
//! the `timer_config` key.

use serde::{Deserialize, Serialize};

use super::database::{Database, KEY_TIMER_CONFIG};
use crate::timer::Phase;

/// Timer durations and cycle length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    /// Focus interval, minutes.
    #[serde(default = "default_focus_duration")]
    pub focus_duration: f64,
    /// Short break, minutes.
    #[serde(default = "default_break_duration")]
    pub break_duration: f64,
    /// Long break, minutes.
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration: f64,
    /// Focus sessions between long breaks.
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
}

fn default_focus_duration() -> f64 {
    25.0
}
fn default_break_duration() -> f64 {
    5.0
}
fn default_long_break_duration() -> f64 {
    15.0
}
fn default_sessions_until_long_break() -> u32 {
    4
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_duration: default_focus_duration(),
            break_duration: default_break_duration(),
            long_break_duration: default_long_break_duration(),
            sessions_until_long_break: default_sessions_until_long_break(),
        }
    }
}

impl TimerConfig {
    /// Smallest accepted duration, minutes.
    pub const MIN_DURATION_MIN: f64 = 0.1;

    /// Clamp every field into its valid range.
    ///
    /// Non-finite or non-positive durations take the field default; all
    /// durations then get the 0.1-minute floor. Cycle length floors at 1.
    pub fn clamped(mut self) -> Self {
        self.focus_duration = clamp_duration(self.focus_duration, default_focus_duration());
        self.break_duration = clamp_duration(self.break_duration, default_break_duration());
        self.long_break_duration =
            clamp_duration(self.long_break_duration, default_long_break_duration());
        self.sessions_until_long_break = self.sessions_until_long_break.max(1);
        self
    }

    /// Configured length of a phase in whole seconds (rounded).
    pub fn phase_seconds(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Focus => self.focus_duration,
            Phase::Break => self.break_duration,
            Phase::LongBreak => self.long_break_duration,
        };
        (minutes * 60.0).round() as u32
    }
}

fn clamp_duration(value: f64, default: f64) -> f64 {
    let value = if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    };
    value.max(TimerConfig::MIN_DURATION_MIN)
}

/// Store for [`TimerConfig`], backed by the kv table.
pub struct ConfigStore<'a> {
    db: &'a Database,
}

impl<'a> ConfigStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read the persisted config, clamped against defaults.
    ///
    /// Absent or malformed data yields the defaults; the first-ever read
    /// seeds the store with them. Never fails.
    pub fn get(&self) -> TimerConfig {
        match self.db.kv_get(KEY_TIMER_CONFIG) {
            Ok(Some(json)) => match serde_json::from_str::<TimerConfig>(&json) {
                Ok(config) => config.clamped(),
                Err(e) => {
                    tracing::warn!(error = %e, "malformed timer config, using defaults");
                    TimerConfig::default()
                }
            },
            Ok(None) => {
                let config = TimerConfig::default();
                self.set(config.clone());
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot read timer config, using defaults");
                TimerConfig::default()
            }
        }
    }

    /// Clamp and persist. A failed write is logged and dropped.
    pub fn set(&self, config: TimerConfig) {
        let config = config.clamped();
        match serde_json::to_string(&config) {
            Ok(json) => {
                if let Err(e) = self.db.kv_set(KEY_TIMER_CONFIG, &json) {
                    tracing::warn!(error = %e, "cannot persist timer config");
                }
            }
            Err(e) => tracing::warn!(error = %e, "cannot serialize timer config"),
        }
    }
}
