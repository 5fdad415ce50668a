//! Cancellable repeating tick source.
//!
//! The engine itself never sleeps; a driver owns one [`Ticker`] per engine
//! and forwards each expiry to [`TimerEngine::tick`]. Whenever the engine's
//! running/transitioning status changes the driver cancels its ticker and,
//! if [`TimerEngine::needs_ticks`] still holds, creates a fresh one -- so at
//! most one live tick source exists per engine at all times.
//!
//! [`TimerEngine::tick`]: super::TimerEngine::tick
//! [`TimerEngine::needs_ticks`]: super::TimerEngine::needs_ticks

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// One tick per second; the first fires a full second from now.
    pub fn every_second() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        // A stalled driver should not burst-feed the countdown afterwards.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    /// Wait for the next tick.
    pub async fn wait(&mut self) {
        self.interval.tick().await;
    }

    /// Cancel the tick source. Consumes the handle so it cannot fire again.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_tick_waits_a_full_period() {
        let start = std::time::Instant::now();
        let mut ticker = Ticker::with_period(Duration::from_millis(20));
        ticker.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[tokio::test]
    async fn ticks_repeat() {
        let start = std::time::Instant::now();
        let mut ticker = Ticker::with_period(Duration::from_millis(10));
        for _ in 0..3 {
            ticker.wait().await;
        }
        assert!(start.elapsed() >= Duration::from_millis(25));
        ticker.cancel();
    }
}
