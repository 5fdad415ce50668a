mod engine;
mod phase;
mod ticker;

pub use engine::{TimerEngine, TimerState, TimerStatus};
pub use phase::Phase;
pub use ticker::Ticker;
