use serde::{Deserialize, Serialize};

/// The three interval kinds the timer cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Focus,
    Break,
    LongBreak,
}

impl Phase {
    /// Transition table for phase completion.
    ///
    /// `focus_completed` is the focus-session count including the phase
    /// that just finished; every `cycle_len`-th focus earns the long break.
    /// Either break always hands back to focus.
    pub fn next(self, focus_completed: u64, cycle_len: u32) -> Phase {
        match self {
            Phase::Focus => {
                if focus_completed % u64::from(cycle_len.max(1)) == 0 {
                    Phase::LongBreak
                } else {
                    Phase::Break
                }
            }
            Phase::Break | Phase::LongBreak => Phase::Focus,
        }
    }

    pub fn is_break(self) -> bool {
        matches!(self, Phase::Break | Phase::LongBreak)
    }
}
