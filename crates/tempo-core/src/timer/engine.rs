//! Timer engine implementation.
//!
//! The engine is a caller-ticked state machine. It owns no thread and no
//! clock of its own beyond the transition delay: the driver calls `tick()`
//! once per second (see [`Ticker`](super::Ticker)) while
//! [`needs_ticks`](TimerEngine::needs_ticks) is true.
//!
//! ## Status transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running
//!            |
//!            v (countdown exhausted)
//!       Transitioning -> Running (break auto-starts) | Idle (focus waits)
//! ```
//!
//! `reset()` routes through the same short Transitioning window from any
//! status. While Transitioning, `start`/`pause` are ignored and the
//! countdown does not move, so a completion can never fire twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::storage::{ConfigStore, Database, SessionRecorder, StatsStore, TimerConfig};

use super::phase::Phase;

/// Delay between a phase completing and the next phase taking over.
/// Long enough for front ends to animate the change.
const TRANSITION_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    /// Short non-interruptible window while a phase change resolves.
    Transitioning,
}

/// Read-only runtime snapshot of the engine, as exposed to front ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub is_running: bool,
    pub is_paused: bool,
    pub current_phase: Phase,
    pub time_remaining: u32,
    pub completed_sessions: u64,
}

/// What the pending transition resolves to.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Advance { next: Phase },
    Reset,
}

/// Phase/countdown state machine.
///
/// Reads durations from the [`ConfigStore`] and hands completed phases to
/// the [`SessionRecorder`]; persistence failures never reach it.
pub struct TimerEngine<'a> {
    db: &'a Database,
    config: TimerConfig,
    status: TimerStatus,
    phase: Phase,
    /// Remaining time in whole seconds for the current phase.
    time_remaining: u32,
    /// Focus phases completed by this engine; drives the long-break cycle.
    completed_sessions: u64,
    session_start: Option<DateTime<Utc>>,
    /// Pending transition and the epoch-ms instant it resolves at.
    pending: Option<(Pending, u64)>,
    transition_delay_ms: u64,
    audio_primed: bool,
}

impl<'a> TimerEngine<'a> {
    /// Create an engine over the given database.
    ///
    /// Starts Idle in the focus phase with the configured focus duration on
    /// the clock, and mirrors the completed-session count from the last
    /// persisted statistics.
    pub fn new(db: &'a Database) -> Self {
        Self::with_transition_delay(db, TRANSITION_DELAY_MS)
    }

    /// Create an engine with an explicit transition delay (tests use 0).
    pub fn with_transition_delay(db: &'a Database, transition_delay_ms: u64) -> Self {
        let config = ConfigStore::new(db).get();
        let completed_sessions = StatsStore::new(db).get().completed_sessions;
        let time_remaining = config.phase_seconds(Phase::Focus);
        Self {
            db,
            config,
            status: TimerStatus::Idle,
            phase: Phase::Focus,
            time_remaining,
            completed_sessions,
            session_start: None,
            pending: None,
            transition_delay_ms,
            audio_primed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    /// Whether a tick source should currently exist for this engine.
    ///
    /// Running needs the countdown; Transitioning needs polling so the
    /// pending phase change resolves. At most one live [`Ticker`] per
    /// engine -- drivers cancel and replace theirs when this flips.
    ///
    /// [`Ticker`]: super::Ticker
    pub fn needs_ticks(&self) -> bool {
        matches!(self.status, TimerStatus::Running | TimerStatus::Transitioning)
    }

    /// Percentage of the current phase elapsed, clamped to 0..=100.
    pub fn progress(&self) -> f64 {
        let total = self.config.phase_seconds(self.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.time_remaining);
        (f64::from(elapsed) / f64::from(total) * 100.0).clamp(0.0, 100.0)
    }

    /// Read-only runtime state, as spec'd for front ends.
    pub fn state(&self) -> TimerState {
        TimerState {
            is_running: self.status == TimerStatus::Running,
            is_paused: self.status == TimerStatus::Paused,
            current_phase: self.phase,
            time_remaining: self.time_remaining,
            completed_sessions: self.completed_sessions,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            is_running: self.status == TimerStatus::Running,
            is_paused: self.status == TimerStatus::Paused,
            remaining_secs: self.time_remaining,
            completed_sessions: self.completed_sessions,
            progress_pct: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                if self.session_start.is_none() {
                    self.session_start = Some(Utc::now());
                }
                let prime_audio = !self.audio_primed;
                self.audio_primed = true;
                Some(Event::TimerStarted {
                    phase: self.phase,
                    remaining_secs: self.time_remaining,
                    prime_audio,
                    at: Utc::now(),
                })
            }
            // Already running, or mid-transition: ignored.
            TimerStatus::Running | TimerStatus::Transitioning => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.time_remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Abandon the current interval and return to Idle after the
    /// transition delay. The in-progress interval is never recorded.
    ///
    /// Allowed from any status; a pending phase advance is discarded.
    /// The `TimerReset` event is emitted by the `tick()` that resolves it.
    pub fn reset(&mut self) {
        self.session_start = None;
        self.status = TimerStatus::Transitioning;
        self.pending = Some((Pending::Reset, now_ms() + self.transition_delay_ms));
    }

    /// Re-read configuration after a settings change.
    ///
    /// While Idle the countdown is recomputed from the new duration of the
    /// current phase; a running countdown is left untouched.
    pub fn on_settings_changed(&mut self) {
        self.config = ConfigStore::new(self.db).get();
        if self.status == TimerStatus::Idle {
            self.time_remaining = self.config.phase_seconds(self.phase);
        }
    }

    /// Advance the clock by one second.
    ///
    /// Call once per second while [`needs_ticks`](Self::needs_ticks). While
    /// Running this decrements the countdown, or -- when it is already at
    /// zero -- completes the phase instead, leaving `time_remaining`
    /// unchanged until the transition resolves. While Transitioning it
    /// polls the pending change.
    pub fn tick(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Running => {
                if self.time_remaining == 0 {
                    return self.phase_complete();
                }
                self.time_remaining -= 1;
                None
            }
            TimerStatus::Transitioning => self.resolve_transition(),
            TimerStatus::Idle | TimerStatus::Paused => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_complete(&mut self) -> Option<Event> {
        let ended_at = Utc::now();
        let started_at = self.session_start.take().unwrap_or(ended_at);
        SessionRecorder::new(self.db).record(self.phase, started_at, ended_at, true);

        // Only leaving focus moves the long-break cycle along.
        if self.phase == Phase::Focus {
            self.completed_sessions += 1;
        }
        let next = self
            .phase
            .next(self.completed_sessions, self.config.sessions_until_long_break);

        self.status = TimerStatus::Transitioning;
        self.pending = Some((Pending::Advance { next }, now_ms() + self.transition_delay_ms));
        Some(Event::PhaseCompleted {
            phase: self.phase,
            next_phase: next,
            at: ended_at,
        })
    }

    fn resolve_transition(&mut self) -> Option<Event> {
        let (_, resolve_at) = self.pending.as_ref()?;
        if now_ms() < *resolve_at {
            return None;
        }
        let (pending, _) = self.pending.take()?;
        match pending {
            Pending::Reset => {
                self.status = TimerStatus::Idle;
                self.time_remaining = self.config.phase_seconds(self.phase);
                Some(Event::TimerReset {
                    phase: self.phase,
                    remaining_secs: self.time_remaining,
                    at: Utc::now(),
                })
            }
            Pending::Advance { next } => {
                self.phase = next;
                self.time_remaining = self.config.phase_seconds(next);
                // Breaks auto-start; focus waits for the user.
                let auto_started = next.is_break();
                if auto_started {
                    self.status = TimerStatus::Running;
                    self.session_start = Some(Utc::now());
                } else {
                    self.status = TimerStatus::Idle;
                }
                Some(Event::PhaseAdvanced {
                    phase: next,
                    duration_secs: self.time_remaining,
                    auto_started,
                    at: Utc::now(),
                })
            }
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
