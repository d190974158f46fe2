//! Fixed-rate tick clock for the sampling loop.
//!
//! Deadlines advance by exactly one period so the average rate holds even
//! when a tick runs late.  If the loop falls more than a full period
//! behind, missed ticks are skipped rather than replayed in a burst.

use std::time::{Duration, Instant};

pub struct TickClock {
    period: Duration,
    start: Instant,
    next: Instant,
    ticks: u64,
}

impl TickClock {
    pub fn new(tick_hz: u32) -> Self {
        let period = Duration::from_secs(1) / tick_hz.max(1);
        let start = Instant::now();
        Self {
            period,
            start,
            next: start + period,
            ticks: 0,
        }
    }

    /// Sleep until the next tick is due.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next.checked_duration_since(now) {
            std::thread::sleep(remaining);
            self.next += self.period;
        } else if now - self.next > self.period {
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
        self.ticks += 1;
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds since the clock was created (monotonic).
    pub fn uptime_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
