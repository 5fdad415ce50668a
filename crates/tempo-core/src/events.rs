use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the engine produces an Event.
/// Front ends render them; the audio collaborator watches `prime_audio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
        /// True on the first start of this engine instance only. The
        /// external audio subsystem activates itself when it sees this.
        prime_audio: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A phase ran its countdown to exhaustion and was recorded.
    PhaseCompleted {
        phase: Phase,
        next_phase: Phase,
        at: DateTime<Utc>,
    },
    /// The transition delay elapsed and the next phase is in place.
    PhaseAdvanced {
        phase: Phase,
        duration_secs: u32,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        is_running: bool,
        is_paused: bool,
        remaining_secs: u32,
        completed_sessions: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
